//! OpenAPI YAML generator
//!
//! Prints the catalog's OpenAPI document as YAML on stdout.
//!
//! ```bash
//! cargo run --bin generate-openapi > openapi.yaml
//! ```

use std::process::ExitCode;

use tere_verde::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => {
            print!("{yaml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to generate OpenAPI YAML: {e}");
            ExitCode::FAILURE
        }
    }
}
