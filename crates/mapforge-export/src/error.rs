//! Export errors.

use mapforge_template::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template `{template}` is invalid")]
    Template {
        template: &'static str,
        #[source]
        source: TemplateError,
    },

    #[error("failed to write artifact `{artifact}`")]
    Sink {
        artifact: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
