//! Text renderings of an organization chart.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::OrgChart;
use crate::domain::entities::StaffId;

const INDENT: &str = "  ";

impl OrgChart {
    /// Indented outline, one member per line, two spaces per level.
    pub fn outline(&self) -> impl Iterator<Item = String> + '_ {
        self.iter()
            .map(|(_, depth, staff)| format!("{}{}", INDENT.repeat(depth), staff.name))
    }
}

impl fmt::Display for OrgChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.outline().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub trait TreeRender {
    fn to_tree(&self) -> Tree<String>;
}

impl TreeRender for OrgChart {
    #[instrument(level = "debug", skip(self))]
    fn to_tree(&self) -> Tree<String> {
        fn build_tree(chart: &OrgChart, id: StaffId) -> Tree<String> {
            let label = chart.name(id).unwrap_or_default().to_string();
            let leaves: Vec<_> = chart
                .subordinates(id)
                .iter()
                .map(|&child| build_tree(chart, child))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        build_tree(self, self.root())
    }
}
