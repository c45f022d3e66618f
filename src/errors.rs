use std::fmt;

/// Errors produced by alphabet construction, encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The alphabet cannot serve as a numeral system (too few or repeated symbols).
    InvalidAlphabet { reason: String },
    /// The input contains a symbol that is not in the alphabet.
    InvalidSymbol {
        symbol: char,
        /// Zero-based index of the symbol within the input.
        position: usize,
        /// Byte offset of the symbol within the UTF-8 input.
        byte_offset: usize,
        input: String,
        valid_chars: String,
    },
    /// A magnitude did not fit the buffer the sizing functions promised.
    ///
    /// Unreachable through `encode`/`decode` unless the sizing math is wrong.
    /// `decode_to_len` raises it when the caller's capacity is too small.
    CapacityOverflow { required: usize, capacity: usize },
    /// The output length for an input of `length` bytes or symbols exceeds `usize`.
    LengthOverflow { length: usize, unit: &'static str },
}

impl CodecError {
    pub fn invalid_alphabet(reason: impl Into<String>) -> Self {
        CodecError::InvalidAlphabet {
            reason: reason.into(),
        }
    }

    /// Create an InvalidSymbol error with display context
    pub fn invalid_symbol(
        symbol: char,
        position: usize,
        byte_offset: usize,
        input: &str,
        valid_chars: &str,
    ) -> Self {
        // Keep the caret visible: show a window that ends shortly after the symbol
        let display_input = if input.chars().count() > 60 {
            let skip = position.saturating_sub(40);
            let window: String = input.chars().skip(skip).take(60).collect();
            if skip > 0 {
                format!("...{}...", window)
            } else {
                format!("{}...", window)
            }
        } else {
            input.to_string()
        };

        CodecError::InvalidSymbol {
            symbol,
            position,
            byte_offset,
            input: display_input,
            valid_chars: valid_chars.to_string(),
        }
    }

    pub fn capacity_overflow(required: usize, capacity: usize) -> Self {
        CodecError::CapacityOverflow { required, capacity }
    }

    pub fn length_overflow(length: usize, unit: &'static str) -> Self {
        CodecError::LengthOverflow { length, unit }
    }

    /// Column of the caret under `input` for an InvalidSymbol error.
    fn caret_column(position: usize, input: &str) -> usize {
        if position > 40 && input.starts_with("...") {
            3 + 40
        } else {
            position
        }
    }
}

impl CodecError {
    /// Renders the error, hint lines included, with or without ANSI color.
    pub fn render(&self, use_color: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, use_color);
        out
    }

    fn write_to(&self, f: &mut impl fmt::Write, use_color: bool) -> fmt::Result {
        match self {
            CodecError::InvalidAlphabet { reason } => {
                write_error(f, use_color, &format!("invalid alphabet: {}", reason))?;
                writeln!(f)?;
                write_hint(
                    f,
                    use_color,
                    "an alphabet needs at least 2 distinct symbols",
                )
            }
            CodecError::InvalidSymbol {
                symbol,
                position,
                input,
                valid_chars,
                ..
            } => {
                write_error(
                    f,
                    use_color,
                    &format!("invalid symbol '{}' at position {}", symbol, position),
                )?;
                writeln!(f)?;
                writeln!(f)?;

                writeln!(f, "  {}", input)?;
                write!(f, "  {}", " ".repeat(Self::caret_column(*position, input)))?;
                if use_color {
                    writeln!(f, "\x1b[1;31m^\x1b[0m")?;
                } else {
                    writeln!(f, "^")?;
                }
                writeln!(f)?;

                let hint_chars = if valid_chars.chars().count() > 80 {
                    let head: String = valid_chars.chars().take(80).collect();
                    format!("{}...", head)
                } else {
                    valid_chars.clone()
                };
                write_hint(f, use_color, &format!("valid symbols: {}", hint_chars))
            }
            CodecError::CapacityOverflow { required, capacity } => {
                write_error(
                    f,
                    use_color,
                    &format!(
                        "magnitude needs {} bytes but only {} were reserved",
                        required, capacity
                    ),
                )?;
                writeln!(f)?;
                write_hint(
                    f,
                    use_color,
                    "the output would have been truncated; this is a sizing bug or a too-small explicit length",
                )
            }
            CodecError::LengthOverflow { length, unit } => {
                write_error(
                    f,
                    use_color,
                    &format!(
                        "output length for {} input {} does not fit in usize",
                        length, unit
                    ),
                )?;
                writeln!(f)?;
                write_hint(f, use_color, "split the input into smaller pieces")
            }
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(should_use_color()))
    }
}

impl std::error::Error for CodecError {}

fn write_error(f: &mut impl fmt::Write, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;31merror:\x1b[0m {}", message)
    } else {
        write!(f, "error: {}", message)
    }
}

fn write_hint(f: &mut impl fmt::Write, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\n\x1b[1;36mhint:\x1b[0m {}", message)
    } else {
        write!(f, "\nhint: {}", message)
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Error when a named alphabet is not in the registry
#[derive(Debug)]
pub struct AlphabetNotFoundError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl AlphabetNotFoundError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl AlphabetNotFoundError {
    /// Renders the error and its hints, with or without ANSI color.
    pub fn render(&self, use_color: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, use_color);
        out
    }

    fn write_to(&self, f: &mut impl fmt::Write, use_color: bool) -> fmt::Result {
        write_error(f, use_color, &format!("alphabet '{}' not found", self.name))?;
        writeln!(f)?;

        if let Some(suggestion) = &self.suggestion {
            write_hint(f, use_color, &format!("did you mean '{}'?", suggestion))?;
            writeln!(f)?;
            write!(f, "      ")?;
        } else {
            writeln!(f)?;
            write!(f, "hint: ")?;
        }

        if use_color {
            write!(
                f,
                "run \x1b[1m`radix-codec list`\x1b[0m to see all alphabets"
            )
        } else {
            write!(f, "run `radix-codec list` to see all alphabets")
        }
    }
}

impl fmt::Display for AlphabetNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(should_use_color()))
    }
}

impl std::error::Error for AlphabetNotFoundError {}
