use std::{
    cmp::Ordering,
    collections::VecDeque,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::error::Error;

/// Load at most `limit` names from the CSV file at `path`.
///
/// The first line is a header and is always skipped. Every other line is
/// split on `,`, and lines with fewer than two fields are ignored without
/// counting toward `limit`. The name is the second field, trimmed.
pub fn load_names<P>(path: P, limit: usize) -> Result<Vec<String>, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let names = read_names(BufReader::new(file), limit).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} names from {:?}, limit {}", names.len(), path, limit);
    Ok(names)
}

/// Same as [`load_names`], reading from any buffered source.
pub fn read_names<R>(reader: R, limit: usize) -> io::Result<Vec<String>>
where
    R: BufRead,
{
    let mut lines = Lines::new(reader);
    if lines.next().transpose()?.is_none() {
        return Ok(vec![]);
    }

    let mut names = vec![];
    while names.len() < limit {
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if let Some(name) = name_field(&line) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Lines of a byte stream. A line ends at `\n`, `\r\n`, a lone `\r`, or
/// one of U+0085, U+2028, U+2029. Bytes that are not UTF-8 decode to
/// U+FFFD instead of failing the read.
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>, // split off the last segment by a Unicode break.
}

impl<R> Lines<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Lines<R> {
        Lines {
            reader,
            buf: vec![],
            pending: VecDeque::new(),
        }
    }

    // Read up to the next `\n`, `\r\n` or `\r`. Ok(None) at end of stream.
    fn read_segment(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let mut seen = false;
        loop {
            let (end, used) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    break;
                }
                match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(i) => {
                        self.buf.extend_from_slice(&available[..i]);
                        (Some(available[i]), i + 1)
                    }
                    None => {
                        self.buf.extend_from_slice(available);
                        (None, available.len())
                    }
                }
            };
            self.reader.consume(used);
            seen = true;
            match end {
                Some(b'\r') => {
                    if self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    break;
                }
                Some(_) => break,
                None => (),
            }
        }
        match seen {
            true => Ok(Some(String::from_utf8_lossy(&self.buf).into_owned())),
            false => Ok(None),
        }
    }
}

impl<R> Iterator for Lines<R>
where
    R: BufRead,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.pop_front() {
            return Some(Ok(line));
        }
        match self.read_segment() {
            Ok(Some(segment)) => {
                let is_break = |c: char| matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}');
                let mut parts = segment.split(is_break);
                let first = parts.next().unwrap_or_default().to_string();
                self.pending.extend(parts.map(str::to_string));
                Some(Ok(first))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

// `str::split` keeps empty trailing fields, so "1," yields an empty name.
fn name_field(line: &str) -> Option<String> {
    line.split(',').nth(1).map(|field| field.trim().to_string())
}

/// Compare two strings ignoring case, character by character.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    a.cmp(b)
}

/// The three ways a dataset is arranged before it is fed to a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrangement {
    Sorted,
    Shuffled,
    Reversed,
}

impl Arrangement {
    /// All arrangements, in the order they are measured.
    pub const ALL: [Arrangement; 3] = [
        Arrangement::Sorted,
        Arrangement::Shuffled,
        Arrangement::Reversed,
    ];

    /// Short label used in the analysis log.
    pub fn label(&self) -> &'static str {
        match self {
            Arrangement::Sorted => "sorted",
            Arrangement::Shuffled => "shuffled",
            Arrangement::Reversed => "reversed",
        }
    }

    /// Heading used in the console report.
    pub fn title(&self) -> &'static str {
        match self {
            Arrangement::Sorted => "Already Sorted",
            Arrangement::Shuffled => "Shuffled",
            Arrangement::Reversed => "Reversed",
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Independent copies of one dataset, one per [`Arrangement`].
#[derive(Clone, Debug)]
pub struct Orderings {
    sorted: Vec<String>,
    shuffled: Vec<String>,
    reversed: Vec<String>,
}

impl Orderings {
    /// Derive all three arrangements from `data`, leaving `data` as is.
    /// Both sorts are stable, equal names keep their input order.
    pub fn derive<R>(data: &[String], rng: &mut R) -> Orderings
    where
        R: Rng + ?Sized,
    {
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| cmp_ignore_case(a, b));

        let mut shuffled = data.to_vec();
        shuffled.shuffle(rng);

        let mut reversed = data.to_vec();
        reversed.sort_by(|a, b| cmp_ignore_case(b, a));

        Orderings {
            sorted,
            shuffled,
            reversed,
        }
    }

    pub fn get(&self, arrangement: Arrangement) -> &[String] {
        match arrangement {
            Arrangement::Sorted => &self.sorted,
            Arrangement::Shuffled => &self.shuffled,
            Arrangement::Reversed => &self.reversed,
        }
    }

    /// Return number of names in each arrangement.
    #[inline]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
