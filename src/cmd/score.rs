use super::InputArgs;
use crate::reports;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::key::Key;
use cipherforge::model::FrequencyModel;
use cipherforge::scorer::Scorer;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub input: InputArgs,

    /// Decryption key: 26 letters, the image of A..Z
    #[arg(short, long)]
    pub key: String,
}

pub fn run(args: &ScoreArgs, config: &Config, model: Arc<FrequencyModel>) -> CfResult<()> {
    let key: Key = args.key.parse()?;
    let ciphertext = args.input.resolve()?;

    let scorer = Scorer::new(model, &ciphertext, config.scoring.formula);
    let details = scorer.score_details(&key);

    println!("\n🔎 === KEY AUDIT ({}) === 🔎", config.scoring.formula);
    reports::print_key_grid(&key.to_string(), &key);
    reports::print_score_details(&key.to_string(), &details);

    println!("Score: {:.4}", details.log_likelihood);
    println!("Decoded: {}", scorer.decode(&key));
    Ok(())
}
