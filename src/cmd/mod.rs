pub mod build;
pub mod decrypt;
pub mod score;

use cipherforge::corpus::SampleText;
use cipherforge::error::{CfResult, CipherForgeError};
use clap::Args;
use std::fs;

/// Where the text to work on comes from. At most one of these may be given;
/// with none, the lorem sample is used.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Literal text
    #[arg(short, long, conflicts_with_all = ["text_file", "sample"])]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "sample")]
    pub text_file: Option<String>,

    /// Built-in sample (lorem, hello_world, pangram)
    #[arg(long)]
    pub sample: Option<SampleText>,
}

impl InputArgs {
    pub fn resolve(&self) -> CfResult<String> {
        let text = if let Some(t) = &self.text {
            t.clone()
        } else if let Some(path) = &self.text_file {
            fs::read_to_string(path)?
        } else {
            self.sample.unwrap_or(SampleText::Lorem).get_str().to_string()
        };

        if text.trim().is_empty() {
            return Err(CipherForgeError::Validation("input text is empty".into()));
        }
        Ok(text)
    }
}
