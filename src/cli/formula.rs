use anyhow::{Context, Result};
use clap::Args;

use formula_mix::logic::normalize::{normalize_word_for_class, normalize_word_for_mix};
use formula_mix::{decode, EncodeConfig, Formula, FormulaEncoder, FormulaMode};

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Formula shape: single, pair, serial, collection, parallel or class
    #[arg(value_name = "MODE")]
    pub mode: FormulaMode,

    /// Words in slot order; use `+` for alternatives
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Proximity count (defaults to the mode's usual value)
    #[arg(short = 'n', long = "count", value_name = "COUNT")]
    pub count: Option<String>,

    /// Keep words as typed, without full-width variants
    #[arg(long = "literal")]
    pub literal: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Formula text, e.g. `{A,5N,B,5N,C}/TX`
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Normalize as a classification code
    #[arg(long = "class")]
    pub class: bool,
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let config = if args.literal {
        EncodeConfig::literal()
    } else {
        EncodeConfig::canonical()
    };
    let count = args
        .count
        .clone()
        .or_else(|| args.mode.default_count().map(str::to_string));
    let counts: Vec<String> = count.into_iter().collect();

    let text = FormulaEncoder::new(config)
        .encode(args.mode, &args.words, &counts)
        .with_context(|| format!("cannot encode {} formula", args.mode))?;
    println!("{}", text);
    Ok(())
}

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let formula = decode(&args.text)?;
    print_formula(&formula);
    Ok(())
}

/// Print a decoded formula one form field per line.
pub fn print_formula(formula: &Formula) {
    println!("mode:   {}", formula.mode);
    for (i, word) in formula.words.iter().enumerate() {
        println!("word {}: {}", i + 1, word);
    }
    if let Some(count) = formula.counts.first() {
        println!("count:  {}", count);
    }
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    let normalized = if args.class {
        normalize_word_for_class(&args.word)
    } else {
        normalize_word_for_mix(&args.word)
    };
    println!("{}", normalized);
    Ok(())
}
