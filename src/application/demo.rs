//! Scripted walkthrough of the organization chart
//!
//! Builds a small company, fires and replaces people, and prints the chart
//! after every step. Recoverable errors are printed and the script carries on;
//! a broken invariant aborts it.

use std::io::Write;

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::config::{OutputStyle, Settings};
use crate::domain::{DomainResult, OrgChart, Staff, TreeRender};

/// What the walkthrough ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Outline of the final chart
    pub final_outline: Vec<String>,
    /// Messages of the recoverable errors that were caught and printed
    pub reported_errors: Vec<String>,
    /// Access level of `d2` in the final chart
    pub d2_access_level: usize,
}

struct Script<'w, W: Write> {
    out: &'w mut W,
    settings: &'w Settings,
    reported_errors: Vec<String>,
}

impl<'w, W: Write> Script<'w, W> {
    fn narrate(&mut self, line: &str) -> ApplicationResult<()> {
        info!("{}", line);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn show(&mut self, chart: &OrgChart) -> ApplicationResult<()> {
        match self.settings.style {
            OutputStyle::Outline => writeln!(self.out, "{}", chart)?,
            OutputStyle::Tree => write!(self.out, "{}", chart.to_tree())?,
        }
        writeln!(self.out, "{}", self.settings.separator)?;
        Ok(())
    }

    /// Print a recoverable error instead of aborting; fatal ones propagate.
    fn tolerate(&mut self, result: DomainResult<Staff>) -> ApplicationResult<()> {
        match result {
            Ok(fired) => {
                debug!("fired {}", fired);
                Ok(())
            }
            Err(e) if !e.is_fatal() => {
                writeln!(self.out, "{}", e)?;
                self.reported_errors.push(e.to_string());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Run the walkthrough, writing the narrative and charts to `out`.
#[instrument(level = "debug", skip(out))]
pub fn run_demo<W: Write>(out: &mut W, settings: &Settings) -> ApplicationResult<DemoReport> {
    let mut script = Script {
        out,
        settings,
        reported_errors: Vec::new(),
    };

    let mut chart = OrgChart::new("boss");
    let boss = chart.root();

    let [b, c, d] = ["b", "c", "d"].map(|name| chart.recruit(name));
    for id in [b, c, d] {
        chart.hire(boss, id)?;
    }

    let [b1, b2, b3] = ["b1", "b2", "b3"].map(|name| chart.recruit(name));
    for id in [b1, b2, b3] {
        chart.hire(b, id)?;
    }

    let [d1, d2] = ["d1", "d2"].map(|name| chart.recruit(name));
    for id in [d1, d2] {
        chart.hire(d, id)?;
    }

    let [b21, b22, b23] = ["b21", "b22", "b23"].map(|name| chart.recruit(name));
    for id in [b21, b22, b23] {
        chart.hire(b2, id)?;
    }

    script.narrate("print staff hierarchy")?;
    script.show(&chart)?;

    script.narrate("b (level 1) fires b2 and hands their staff to b3")?;
    chart.fire_by(b, b2, b3)?;
    script.show(&chart)?;

    script.narrate("b (level 1) fires b3 and hires newcomer b4 in their place")?;
    let b4 = chart.recruit("b4");
    chart.fire_by(b, b3, b4)?;
    script.show(&chart)?;

    script.narrate("boss (level 0) fires d (level 1) and hands their staff to b4 (level 2)")?;
    chart.fire_by(boss, d, b4)?;
    script.show(&chart)?;

    script.narrate("b tries to fire c, a colleague of the same level")?;
    let result = chart.fire_by(b, c, b4);
    script.tolerate(result)?;
    script.show(&chart)?;

    script.narrate("boss fires c, who has no staff")?;
    chart.fire_by(boss, c, b4)?;
    script.show(&chart)?;

    script.narrate("boss tries to fire c, who is already fired")?;
    let result = chart.fire_by(boss, c, b4);
    script.tolerate(result)?;
    script.show(&chart)?;

    script.narrate("find the access level of d2")?;
    let d2_access_level = chart.access_level(d2)?;
    script.narrate(&format!("d2 level {}", d2_access_level))?;
    writeln!(script.out, "{}", settings.separator)?;

    Ok(DemoReport {
        final_outline: chart.outline().collect(),
        reported_errors: script.reported_errors,
        d2_access_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reports_two_errors_and_final_level() {
        let mut out = Vec::new();
        let report = run_demo(&mut out, &Settings::default()).unwrap();

        assert_eq!(report.reported_errors.len(), 2);
        assert_eq!(report.d2_access_level, 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("d2 level 3"));
        assert!(text.contains("not in the reporting line of b"));
        assert!(text.contains("not a member of the organization"));
    }
}
