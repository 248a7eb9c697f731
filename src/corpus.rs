use crate::error::CfResult;
use crate::model::{FrequencyModel, ModelBuilder};
use strum_macros::{Display, EnumString};

/// English prose bundled with the crate, used when no reference corpus is supplied.
pub const REFERENCE_TEXT: &str = include_str!("../data/reference/english.txt");

/// Token accepted wherever a corpus path is expected, meaning [`REFERENCE_TEXT`].
pub const BUILTIN_CORPUS: &str = "builtin";

#[derive(Debug, Clone, Copy, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum SampleText {
    Lorem,
    HelloWorld,
    Pangram,
}

impl SampleText {
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Lorem => concat!(
                "There are many variations of passages of Lorem Ipsum available, but the majority ",
                "have suffered alteration in some form, by injected humour, or randomised words ",
                "which don't look even slightly believable. If you are going to use a passage of ",
                "Lorem Ipsum, you need to be sure there isn't anything embarrassing hidden in the ",
                "middle of text. All the Lorem Ipsum generators on the Internet tend to repeat ",
                "predefined chunks as necessary, making this the first true generator on the ",
                "Internet. It uses a dictionary of over 200 Latin words, combined with a handful ",
                "of model sentence structures, to generate Lorem Ipsum which looks reasonable. ",
                "The generated Lorem Ipsum is therefore always free from repetition, injected ",
                "humour, or non-characteristic words etc."
            ),
            Self::HelloWorld => "HELLO WORLD",
            Self::Pangram => "The quick brown fox jumps over the lazy dog while five boxing wizards jump quickly.",
        }
    }
}

/// Bigram model over the bundled reference text.
pub fn builtin_model() -> FrequencyModel {
    let mut builder = ModelBuilder::new();
    builder.add_text(REFERENCE_TEXT);
    builder.build()
}

/// Builds one model from file paths and/or [`BUILTIN_CORPUS`] tokens.
pub fn build_model_from_sources<S: AsRef<str>>(sources: &[S]) -> CfResult<FrequencyModel> {
    let mut builder = ModelBuilder::new();
    for source in sources {
        let source = source.as_ref();
        if source == BUILTIN_CORPUS {
            builder.add_text(REFERENCE_TEXT);
        } else {
            builder.add_file(source)?;
        }
    }
    Ok(builder.build())
}
