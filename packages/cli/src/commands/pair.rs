use anyhow::Result;
use colored::Colorize;
use snapdiff_batch::diff_pair;
use snapdiff_engine::DiffOptions;
use std::path::Path;

pub fn pair(reference: &Path, actual: &Path, output: &Path, options: DiffOptions) -> Result<()> {
    let result = diff_pair(reference, actual, output, options)?;

    println!(
        "{} {} vs {} → {}",
        "✓".green(),
        reference.display(),
        actual.display(),
        output.display()
    );
    println!(
        "   {} of {} pixels differ ({:.2}%)",
        result.differing_pixels,
        result.total_pixels(),
        result.mismatch_percent()
    );

    Ok(())
}
