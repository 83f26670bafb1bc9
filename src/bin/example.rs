//! Load combination example - timber roof with snow and wind
//!
//! Run with `RUST_LOG=debug` to see generation statistics. An optional
//! argument names a JSON load catalogue to use instead of the built-in model.

use anyhow::Context;
use design_loads::prelude::*;

fn roof_model() -> anyhow::Result<Vec<Vec<LoadCaseGroup>>> {
    // Self-weight of structure and roofing always act together
    let permanent = LoadCaseGroup::together(vec![
        LoadCase::permanent("G1"),
        LoadCase::permanent("G2"),
    ])?;

    // Imposed loads on the attic floor may act in any combination
    let imposed = LoadCaseGroup::standard(vec![
        LoadCase::variable("Q1", VariableCategory::A, LoadDurationClass::MediumTerm),
        LoadCase::variable("Q2", VariableCategory::B, LoadDurationClass::MediumTerm),
    ])?;

    // Snow arrangements: undrifted, drifted left, drifted right
    let snow = LoadCaseGroup::exclusive(
        ["S1", "S2", "S3"]
            .iter()
            .map(|label| {
                LoadCase::variable(
                    label,
                    VariableCategory::SnowBelow1000M,
                    LoadDurationClass::ShortTerm,
                )
            })
            .collect(),
    )?;

    // Wind directions 0, 90, 180 and 270 degrees
    let wind = LoadCaseGroup::exclusive(
        ["W1", "W2", "W3", "W4"]
            .iter()
            .map(|label| {
                LoadCase::variable(label, VariableCategory::Wind, LoadDurationClass::Instantaneous)
            })
            .collect(),
    )?;

    Ok(vec![
        vec![permanent.clone(), imposed],
        vec![permanent, snow, wind],
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let group_sets = match std::env::args().nth(1) {
        Some(path) => LoadCatalogue::from_file(&path)
            .with_context(|| format!("failed to read load catalogue '{}'", path))?
            .group_sets()?,
        None => roof_model()?,
    };

    let runs = [
        (LimitState::Uls, CombinationType::Basic),
        (LimitState::Uls, CombinationType::Alternative),
        (LimitState::Sls, CombinationType::Characteristic),
        (LimitState::Sls, CombinationType::Frequent),
        (LimitState::Sls, CombinationType::QuasiPermanent),
    ];

    for (limit_state, combination_type) in runs {
        let mut generator = CombinationsGenerator::new(limit_state, combination_type)?;
        let count = generator.generate_from_sets(&group_sets)?;

        println!("=== {} {} ({} combinations) ===", limit_state, combination_type, count);
        for combination in generator.combinations() {
            println!(
                "{:<28} {:<14} {}",
                combination.label(),
                combination.load_duration_class(),
                combination.combination_key()
            );
        }
        println!();
    }

    Ok(())
}
