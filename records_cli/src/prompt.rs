/// Interactive prompts: y/N confirmation and numbered pick-lists
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Ask a y/N question; anything but `y`/`yes` declines
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{} (y/N): ", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Let the user pick one of `options` by number, re-asking until the answer is valid
pub fn pick<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    options: &[String],
) -> Result<String> {
    if options.is_empty() {
        bail!("No {} available. Create one first.", label);
    }

    writeln!(output, "Select a {}:", label)?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, option)?;
    }

    loop {
        write!(output, "Choice [1-{}]: ", options.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No {} selected.", label);
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].clone()),
            _ => writeln!(output, "Invalid choice, try again.")?,
        }
    }
}
