use std::{
    fs::OpenOptions,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::bench::Run;
use crate::error::Error;

/// Default file the analysis lines are appended to.
pub const ANALYSIS_FILE: &str = "analysis.txt";

/// Timings collected for one invocation, ready to be printed and
/// persisted.
#[derive(Clone, Debug)]
pub struct Report {
    count: usize, // requested number of names.
    runs: Vec<Run>,
}

impl Report {
    pub fn new(count: usize, runs: Vec<Run>) -> Report {
        Report { count, runs }
    }

    /// Write the human readable report, every duration in seconds with
    /// 9 decimal places.
    pub fn write_to<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        write!(w, "\nN = {}\n\n", self.count)?;
        for run in self.runs.iter() {
            writeln!(w, "{}:", run.arrangement().title())?;
            for sample in run.samples().iter() {
                writeln!(w, "  {}: {:.9} s", sample.op, sample.secs())?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Print the report on stdout.
    pub fn print(&self) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
            .and_then(|_| handle.flush())
            .map_err(Error::Print)
    }

    /// Return one `count,label,insert,search,delete` line per run.
    ///
    /// Seconds use the shortest `f64` form that round-trips, without an
    /// exponent: `0.0000015`, `0`, `1`. Older logs of this format may
    /// carry `1.5E-6`, `0.0`, `1.0` for the same values, readers must
    /// accept both.
    pub fn log_lines(&self) -> Vec<String> {
        self.runs
            .iter()
            .map(|run| {
                let secs: Vec<String> = run
                    .samples()
                    .iter()
                    .map(|sample| sample.secs().to_string())
                    .collect();
                format!("{},{},{}", self.count, run.arrangement(), secs.join(","))
            })
            .collect()
    }

    /// Append [`Report::log_lines`] to the file at `path`, creating it
    /// when missing. The file is flushed and closed before returning.
    pub fn append_to<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let to_error = |source: io::Error| Error::WriteLog {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(to_error)?;
        let mut w = BufWriter::new(file);
        for line in self.log_lines() {
            writeln!(w, "{}", line).map_err(to_error)?;
        }
        w.flush().map_err(to_error)?;

        info!("appended {} lines to {:?}", self.runs.len(), path);
        Ok(())
    }
}
