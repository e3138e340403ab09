//! Memoization demos: decorators applied by hand, then through `compose!`

use crate::compose;
use crate::functional::{func, log, memoize, Func};
use crate::Result;
use std::io::Write;

const ECHO_TEXT: &str = "Echoeeeeeeeeeeeeeeeed";

struct Subjects {
    sqrt: Func<f64, f64>,
    add: Func<(i64, i64), i64>,
    echo: Func<String, String>,
}

impl Subjects {
    /// Call every subject once, writing the results under `title`
    fn round<W: Write>(&self, title: &str, out: &mut W) -> Result<()> {
        writeln!(out, "{title}")?;
        writeln!(out, "{}", "-".repeat(title.len()))?;
        writeln!(out, "Square root result {}", (self.sqrt)(16.0))?;
        writeln!(out, "Addition result {}", (self.add)((16, 10)))?;
        writeln!(out, "Echo result {}", (self.echo)(ECHO_TEXT.to_string()))?;
        Ok(())
    }

    /// First round computes (and logs), second round is served from the caches
    fn run<W: Write>(&self, label: &str, out: &mut W) -> Result<()> {
        self.round(&format!("Computed ({label}):"), out)?;
        writeln!(out)?;
        self.round(&format!("Optimized ({label}):"), out)
    }
}

/// Wrap each function with `log`, then with `memoize`, one call at a time
pub fn basic<W: Write>(out: &mut W) -> Result<()> {
    let sqrt = log(func(f64::sqrt));
    let add = log(func(|(x, y): (i64, i64)| x + y));
    let echo = log(func(|x: String| x));

    let subjects = Subjects {
        sqrt: memoize(sqrt),
        add: memoize(add),
        echo: memoize(echo),
    };
    subjects.run("Basic Function Demo", out)
}

/// Build the same memoized, logged functions with a single composition each
pub fn composition<W: Write>(out: &mut W) -> Result<()> {
    let subjects = Subjects {
        sqrt: compose!(memoize::<f64, f64>, log::<f64, f64>)(func(f64::sqrt)),
        add: compose!(memoize::<(i64, i64), i64>, log::<(i64, i64), i64>)(func(
            |(x, y): (i64, i64)| x + y,
        )),
        echo: compose!(memoize::<String, String>, log::<String, String>)(func(|x: String| x)),
    };
    subjects.run("Composition Function Demo", out)
}
