//! Print the OpenAPI document as pretty JSON.

use color_eyre::eyre::{Result, WrapErr};
use habit_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialize OpenAPI document")?;
    println!("{json}");
    Ok(())
}
