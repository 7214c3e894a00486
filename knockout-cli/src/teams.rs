use std::fs;
use std::io;
use std::path::Path;

use crate::utils::Prompt;

/// Reads team names from a file.
pub fn read_file<P>(path: P) -> io::Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let input = fs::read_to_string(path)?;
    Ok(parse(&input))
}

/// Parses one team name per line, in seed order. Blank lines and lines starting with `#` are
/// skipped.
pub fn parse(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Prompts for team names until an empty line is entered.
pub fn prompt() -> io::Result<Vec<String>> {
    println!("Enter the team names in seed order. Finish with an empty line.");

    let mut names = Vec::new();
    loop {
        let msg = format!("Seed {}", names.len() + 1);

        match Prompt::<String>::new(&msg).read_valid()? {
            Some(name) if !name.trim().is_empty() => names.push(name.trim().to_owned()),
            _ => break,
        }
    }

    log::debug!("Read {} team names", names.len());

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn test_parse() {
        let input = "
            # Seeded by last season's standings
            Alpha
            Bravo

            Charlie
            #Delta
        ";

        assert_eq!(parse(input), ["Alpha", "Bravo", "Charlie"]);
        assert!(parse("").is_empty());
    }
}
