use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Maximum number of words in memory.
pub const NUM_MEMORY: usize = 65536;

/// Word-addressed memory port. Addresses are signed because they are
/// computed from register contents plus a signed offset.
pub trait Bus {
    fn read_word(&mut self, addr: i32) -> Result<i32>;
    fn write_word(&mut self, addr: i32, val: i32) -> Result<()>;
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemError {
    #[error("address {addr} outside memory of {size} words")]
    OutOfBounds { addr: i32, size: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("error in reading address {addr}: {text:?} is not a decimal word")]
    BadWord { addr: usize, text: String },
    #[error("image of {words} words does not fit in {capacity} words of memory")]
    TooLarge { words: usize, capacity: usize },
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WordMemory {
    pub mem: Vec<i32>,
    /// Number of words loaded from the image; bounds the state dump.
    pub loaded: usize,
}

impl WordMemory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size],
            loaded: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    /// Copy `words` to address 0 onwards.
    pub fn load(&mut self, words: &[i32]) -> Result<(), LoadError> {
        if words.len() > self.mem.len() {
            return Err(LoadError::TooLarge {
                words: words.len(),
                capacity: self.mem.len(),
            });
        }
        self.mem[..words.len()].copy_from_slice(words);
        self.loaded = words.len();
        Ok(())
    }

    /// The words covered by the loaded image.
    pub fn loaded_words(&self) -> &[i32] {
        &self.mem[..self.loaded]
    }

    fn index(&self, addr: i32) -> Result<usize, MemError> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.mem.len())
            .ok_or(MemError::OutOfBounds {
                addr,
                size: self.mem.len(),
            })
    }
}

impl Bus for WordMemory {
    fn read_word(&mut self, addr: i32) -> Result<i32> {
        let i = self.index(addr)?;
        Ok(self.mem[i])
    }
    fn write_word(&mut self, addr: i32, val: i32) -> Result<()> {
        let i = self.index(addr)?;
        self.mem[i] = val;
        Ok(())
    }
}

/// Parse a machine-code file: one decimal word per line.
pub fn parse_image(text: &str) -> Result<Vec<i32>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(addr, line)| {
            line.trim().parse::<i32>().map_err(|_| LoadError::BadWord {
                addr,
                text: line.to_string(),
            })
        })
        .collect()
}
