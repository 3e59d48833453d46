//! Command-line tokenizer
//!
//! Splits a line on runs of whitespace into a command word and its
//! arguments. Each word is capped at [`MAX_WORD_LEN`] characters.

/// Longest word kept; extra characters are dropped
pub const MAX_WORD_LEN: usize = 63;

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Tokenizes `input`, returning `None` for a blank line
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = input
            .split_whitespace()
            .map(|word| word.chars().take(MAX_WORD_LEN).collect::<String>());
        let command = words.next()?;
        Some(Self {
            command,
            args: words.collect(),
        })
    }

    /// The `n`th argument, counting from 0
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(|s| s.as_str())
    }

    /// Arguments from `n` on joined by single spaces
    pub fn rest(&self, n: usize) -> Option<String> {
        if n >= self.args.len() {
            return None;
        }
        Some(self.args[n..].join(" "))
    }
}
