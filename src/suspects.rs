//! Static clue -> suspect lookup table.

use crate::room::{normalize_clue, normalize_name};

/// Bucket count of the chained table. A small prime keeps short clue keys
/// from clustering.
pub const BUCKET_COUNT: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mapping {
    clue: String,
    suspect: String,
}

/// Maps clue text to the suspect it implicates. Built once, read-only
/// afterwards.
///
/// Each bucket is a chain searched newest-first, so registering the same
/// clue twice makes the later suspect shadow the earlier one.
#[derive(Debug, Clone)]
pub struct SuspectDirectory {
    buckets: Vec<Vec<Mapping>>,
    suspects: Vec<String>,
    len: usize,
}

/// djb2 over the UTF-8 bytes of `key`, reduced to a bucket index.
#[must_use]
pub fn bucket_of(key: &str) -> usize {
    let hash = key
        .bytes()
        .fold(5381_u64, |h, b| h.wrapping_mul(33).wrapping_add(u64::from(b)));
    (hash % BUCKET_COUNT as u64) as usize
}

impl SuspectDirectory {
    pub fn build<I, C, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: Into<String>,
    {
        let mut directory = Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
            suspects: Vec::new(),
            len: 0,
        };
        for (clue, suspect) in pairs {
            directory.register(clue.into(), suspect.into());
        }
        directory
    }

    /// The reference case: three suspects, eight clues.
    #[must_use]
    pub fn fixed_table() -> Self {
        Self::build([
            ("Frasco quebrado", "Dr. Silva"),
            ("Luvas manchadas", "Dr. Silva"),
            ("Fio de cabelo loiro", "Maria"),
            ("Carta rasgada", "Maria"),
            ("Mapa rasgado", "Maria"),
            ("Pegadas de botas", "Capitão Rocha"),
            ("Chave enferrujada", "Capitão Rocha"),
            ("Livro sobre mutacoes", "Dr. Silva"),
        ])
    }

    /// Keys and names are stored in the same form rooms store them, so a
    /// clue picked up in a room always finds its mapping.
    fn register(&mut self, clue: String, suspect: String) {
        let clue = normalize_clue(&clue).unwrap_or_default();
        let suspect = normalize_name(&suspect);
        if !self.suspects.contains(&suspect) {
            self.suspects.push(suspect.clone());
        }
        // Chains grow at the tail and are searched from the tail.
        self.buckets[bucket_of(&clue)].push(Mapping { clue, suspect });
        self.len += 1;
    }

    /// Suspect implicated by `clue`, if any.
    #[must_use]
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let clue = normalize_clue(clue)?;
        self.buckets[bucket_of(&clue)]
            .iter()
            .rev()
            .find(|m| m.clue == clue)
            .map(|m| m.suspect.as_str())
    }

    /// Distinct suspect names, in order of first registration.
    #[must_use]
    pub fn suspects(&self) -> &[String] {
        &self.suspects
    }

    #[must_use]
    pub fn is_suspect(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.suspects.iter().any(|s| *s == name)
    }

    /// Number of registered mappings, shadowed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
