pub mod chart;
pub mod config;
pub mod error;
pub mod frequency;
pub mod lemmatizer;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod resources;
pub mod stopwords;
pub mod table;
pub mod tagger;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{Analysis, RunOutput, analyze, run, run_with};
pub use resources::LanguageResources;
pub use table::{Document, DocumentTable};
