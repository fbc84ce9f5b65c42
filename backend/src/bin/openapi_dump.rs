//! Print the OpenAPI document as JSON.

use color_eyre::eyre::Result;
use jobbox::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi().to_pretty_json()?;
    println!("{json}");
    Ok(())
}
