//! Directive argument coercion.
//!
//! Each directive handler declares a compact type signature, one character
//! per argument: `w` bare word, `n` integer, `s` quoted string, `S` integer
//! or quoted string. Coercion failures are syntax errors carrying the
//! current source line.

use crate::error::{Error, Result};

/// A directive argument after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A bare word, returned verbatim
    Word(String),
    /// A parsed integer
    Num(u32),
    /// A quoted string with the quotes stripped
    Str(String),
}

impl ArgValue {
    /// The numeric value. Only call on arguments coerced with `n`.
    pub fn num(&self) -> u32 {
        match self {
            ArgValue::Num(n) => *n,
            _ => unreachable!("argspec guarantees a number"),
        }
    }

    /// The textual value of a word or string argument.
    pub fn text(&self) -> &str {
        match self {
            ArgValue::Word(s) | ArgValue::Str(s) => s,
            ArgValue::Num(_) => unreachable!("argspec guarantees text"),
        }
    }
}

/// Validate and coerce `args` against the type signature `spec`.
pub fn coerce(line: u32, name: &str, args: &[String], spec: &str) -> Result<Vec<ArgValue>> {
    if args.len() != spec.len() {
        return Err(Error::syntax(
            line,
            format!(
                "{} directive expects {} args, got {}",
                name,
                spec.len(),
                args.len()
            ),
        ));
    }

    let mut values = Vec::with_capacity(args.len());
    for (n, (code, token)) in spec.chars().zip(args).enumerate() {
        let value = match code {
            'w' => ArgValue::Word(token.clone()),
            'n' => ArgValue::Num(parse_number(line, name, n, token)?),
            's' => ArgValue::Str(unquote(line, name, n, token)?),
            'S' if is_all_digits(token) => ArgValue::Num(parse_number(line, name, n, token)?),
            'S' => ArgValue::Str(unquote(line, name, n, token)?),
            _ => unreachable!("unknown argspec code {:?}", code),
        };
        values.push(value);
    }
    Ok(values)
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn parse_number(line: u32, name: &str, n: usize, token: &str) -> Result<u32> {
    if !is_all_digits(token) {
        return Err(Error::syntax(
            line,
            format!("{} directive expects a number as its {}th arg", name, n + 1),
        ));
    }
    token.parse().map_err(|_| {
        Error::syntax(
            line,
            format!("{} directive expects a number as its {}th arg", name, n + 1),
        )
    })
}

fn unquote(line: u32, name: &str, n: usize, token: &str) -> Result<String> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Ok(token[1..token.len() - 1].to_string())
    } else {
        Err(Error::syntax(
            line,
            format!(
                "{} directive expects a quoted string as its {}th arg",
                name,
                n + 1
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_and_number() {
        let values = coerce(1, "area", &tokens(&["90", "80"]), "nn").unwrap();
        assert_eq!(values, vec![ArgValue::Num(90), ArgValue::Num(80)]);
    }

    #[test]
    fn test_string_strips_quotes() {
        let values = coerce(1, "font", &tokens(&[r#""bold""#]), "s").unwrap();
        assert_eq!(values[0].text(), "bold");
    }

    #[test]
    fn test_string_or_number() {
        let values = coerce(1, "test", &tokens(&[r#""foo""#, "10"]), "SS").unwrap();
        assert_eq!(values, vec![ArgValue::Str("foo".into()), ArgValue::Num(10)]);
    }

    #[test]
    fn test_count_mismatch() {
        let err = coerce(3, "size", &tokens(&[]), "n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error on line 3: size directive expects 1 args, got 0"
        );
    }

    #[test]
    fn test_unquoted_string_fails() {
        assert!(coerce(1, "font", &tokens(&["no-quotes"]), "s").is_err());
        assert!(coerce(1, "font", &tokens(&[r#""no-quote"#]), "s").is_err());
        assert!(coerce(1, "font", &tokens(&[r#"no-quote""#]), "s").is_err());
    }

    #[test]
    fn test_non_digit_number_fails() {
        assert!(coerce(1, "size", &tokens(&["5x"]), "n").is_err());
        assert!(coerce(1, "size", &tokens(&["-5"]), "n").is_err());
    }
}
