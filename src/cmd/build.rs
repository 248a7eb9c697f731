use crate::reports;
use clap::Args;
use cipherforge::model::FrequencyModel;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// How many of the most frequent bigrams to list
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

pub fn run(args: &BuildArgs, model: &FrequencyModel) {
    println!("\n📚 === BIGRAM MODEL === 📚");
    println!(
        "Distinct: {} | Total: {}",
        model.distinct(),
        model.total()
    );
    reports::print_model_report(model, args.top);
}
