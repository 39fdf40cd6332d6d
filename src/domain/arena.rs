use std::collections::HashSet;

use generational_arena::Arena;
use tracing::{debug, instrument, trace};

use crate::domain::entities::{Staff, StaffId};
use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
struct StaffNode {
    data: Staff,
    /// Boss of this member, None for the root and for freestanding recruits
    parent: Option<StaffId>,
    /// Direct reports in hiring order
    children: Vec<StaffId>,
}

impl StaffNode {
    fn new(data: Staff) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-based organization chart.
///
/// All staff live in one generational arena. The chart has a single designated
/// root; everyone reachable from it is a member. Recruits that have not been
/// hired yet live in the same arena as freestanding nodes (or small freestanding
/// subtrees) until they are attached with [`OrgChart::hire`].
///
/// Parent links are plain handles, so there is no shared ownership between a
/// boss and their reports.
#[derive(Debug)]
pub struct OrgChart {
    arena: Arena<StaffNode>,
    root: StaffId,
}

impl OrgChart {
    /// Create a chart whose root is a staff member called `name`.
    pub fn new(name: &str) -> Self {
        Self::with_root(Staff::new(name))
    }

    pub fn with_root(root: Staff) -> Self {
        let mut arena = Arena::new();
        let root = StaffId(arena.insert(StaffNode::new(root)));
        Self { arena, root }
    }

    pub fn root(&self) -> StaffId {
        self.root
    }

    /// Create a freestanding staff member that is not part of the organization yet.
    #[instrument(level = "trace", skip(self))]
    pub fn recruit(&mut self, name: &str) -> StaffId {
        self.recruit_as(Staff::new(name))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn recruit_as(&mut self, staff: Staff) -> StaffId {
        StaffId(self.arena.insert(StaffNode::new(staff)))
    }

    pub fn staff(&self, id: StaffId) -> Option<&Staff> {
        self.arena.get(id.0).map(|node| &node.data)
    }

    pub fn name(&self, id: StaffId) -> Option<&str> {
        self.staff(id).map(|staff| staff.name.as_str())
    }

    /// Direct boss of `id`. None for the root, freestanding recruits and stale handles.
    pub fn boss(&self, id: StaffId) -> Option<StaffId> {
        self.arena.get(id.0).and_then(|node| node.parent)
    }

    /// Direct reports of `id` in hiring order.
    pub fn subordinates(&self, id: StaffId) -> &[StaffId] {
        self.arena
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of members reachable from the root, root included.
    pub fn headcount(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first pre-order walk over all members, yielding `(id, depth, staff)`.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(self, self.root)
    }

    /// Walks boss links upward until a member without a boss is found.
    ///
    /// For members this is the root; for freestanding recruits it is the top
    /// of their own subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn find_root(&self, id: StaffId) -> DomainResult<StaffId> {
        self.node(id)?;
        Ok(self.ancestors(id).last().unwrap_or(id))
    }

    /// Number of boss links between `id` and the top of its tree (root = 0).
    #[instrument(level = "debug", skip(self))]
    pub fn access_level(&self, id: StaffId) -> DomainResult<usize> {
        self.node(id)?;
        Ok(self.ancestors(id).count())
    }

    /// Whether `id` belongs to the organization.
    ///
    /// Scans every member from the root instead of checking a single branch:
    /// people move between branches as they are fired and replaced.
    #[instrument(level = "trace", skip(self))]
    pub fn is_member(&self, id: StaffId) -> bool {
        self.iter().any(|(member, _, _)| member == id)
    }

    /// Attach the freestanding `candidate` as a direct report of `boss`.
    #[instrument(level = "debug", skip(self))]
    pub fn hire(&mut self, boss: StaffId, candidate: StaffId) -> DomainResult<()> {
        self.check_hire(boss, candidate)?;
        self.attach(boss, candidate)
    }

    /// Remove `target` from the organization, handing their reports to `replacement`.
    ///
    /// A replacement from outside the organization is first hired at the
    /// target's position. All checks run before the chart is touched, so a
    /// rejected call leaves it unchanged. Returns the fired member.
    #[instrument(level = "debug", skip(self))]
    pub fn fire(&mut self, target: StaffId, replacement: StaffId) -> DomainResult<Staff> {
        if !self.is_member(target) {
            return Err(DomainError::NotMember(self.label(target)));
        }
        if target == self.root {
            return Err(DomainError::CannotFireRoot(self.label(target)));
        }
        self.node(replacement)?;
        if replacement == target {
            return Err(self.invalid_replacement(target, replacement, "same person"));
        }
        if self.is_above(replacement, target) {
            return Err(self.invalid_replacement(target, replacement, "replacement is their superior"));
        }
        if self.is_above(target, replacement) {
            return Err(self.invalid_replacement(target, replacement, "replacement reports to them"));
        }
        let former_boss = self.boss(target).ok_or_else(|| {
            DomainError::InvariantViolation(format!("member {} has no boss", self.label(target)))
        })?;

        let newcomer = !self.is_member(replacement);
        if newcomer {
            self.check_hire(former_boss, replacement)?;
            self.attach(former_boss, replacement)?;
        }
        self.transfer_subordinates(target, replacement)?;
        self.detach(former_boss, target)?;

        let fired = self.arena.remove(target.0).ok_or_else(|| {
            DomainError::InvariantViolation(format!("{} vanished while being fired", target))
        })?;
        debug!(
            "fired {}, reports moved to {}",
            fired.data.name,
            self.label(replacement)
        );
        Ok(fired.data)
    }

    /// Fire on behalf of `manager`: `target` must be somewhere below them.
    #[instrument(level = "debug", skip(self))]
    pub fn fire_by(
        &mut self,
        manager: StaffId,
        target: StaffId,
        replacement: StaffId,
    ) -> DomainResult<Staff> {
        if !self.is_member(target) {
            return Err(DomainError::NotMember(self.label(target)));
        }
        if !self.is_above(manager, target) {
            return Err(DomainError::NotSubordinate {
                manager: self.label(manager),
                target: self.label(target),
            });
        }
        self.fire(target, replacement)
    }

    /// Check that boss and report links agree and every member is reachable exactly once.
    pub fn verify(&self) -> DomainResult<()> {
        if self.node(self.root)?.parent.is_some() {
            return Err(DomainError::InvariantViolation("root has a boss".into()));
        }
        let mut seen = HashSet::new();
        for (id, _, _) in self.iter() {
            if !seen.insert(id) {
                return Err(DomainError::InvariantViolation(format!(
                    "{} is reachable twice",
                    self.label(id)
                )));
            }
            for &child in self.subordinates(id) {
                if self.boss(child) != Some(id) {
                    return Err(DomainError::InvariantViolation(format!(
                        "{} is listed under {} but reports elsewhere",
                        self.label(child),
                        self.label(id)
                    )));
                }
            }
            if let Some(boss) = self.boss(id) {
                if !self.subordinates(boss).contains(&id) {
                    return Err(DomainError::InvariantViolation(format!(
                        "{} reports to {} but is not listed there",
                        self.label(id),
                        self.label(boss)
                    )));
                }
            }
        }
        Ok(())
    }

    fn node(&self, id: StaffId) -> DomainResult<&StaffNode> {
        self.arena.get(id.0).ok_or(DomainError::UnknownStaff(id))
    }

    fn node_mut(&mut self, id: StaffId) -> DomainResult<&mut StaffNode> {
        self.arena.get_mut(id.0).ok_or(DomainError::UnknownStaff(id))
    }

    /// Name for messages; stale handles fall back to their id.
    fn label(&self, id: StaffId) -> String {
        self.name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn invalid_replacement(
        &self,
        target: StaffId,
        replacement: StaffId,
        reason: &'static str,
    ) -> DomainError {
        DomainError::InvalidReplacement {
            target: self.label(target),
            replacement: self.label(replacement),
            reason,
        }
    }

    fn ancestors(&self, id: StaffId) -> impl Iterator<Item = StaffId> + '_ {
        std::iter::successors(self.boss(id), move |&current| self.boss(current))
    }

    /// True if `upper` is a strict ancestor of `id`.
    fn is_above(&self, upper: StaffId, id: StaffId) -> bool {
        self.ancestors(id).any(|ancestor| ancestor == upper)
    }

    fn check_hire(&self, boss: StaffId, candidate: StaffId) -> DomainResult<()> {
        let boss_node = self.node(boss)?;
        let candidate_node = self.node(candidate)?;
        if candidate_node.data.kind != boss_node.data.kind {
            return Err(DomainError::TypeMismatch {
                name: candidate_node.data.name.clone(),
                expected: boss_node.data.kind,
                found: candidate_node.data.kind,
            });
        }
        if candidate_node.parent.is_some() {
            return Err(DomainError::AlreadyHired(candidate_node.data.name.clone()));
        }
        if candidate == self.root {
            return Err(DomainError::CannotHireRoot(candidate_node.data.name.clone()));
        }
        if self.find_root(boss)? == candidate {
            return Err(DomainError::WouldCreateCycle {
                boss: boss_node.data.name.clone(),
                candidate: candidate_node.data.name.clone(),
            });
        }
        Ok(())
    }

    fn attach(&mut self, boss: StaffId, candidate: StaffId) -> DomainResult<()> {
        self.node_mut(candidate)?.parent = Some(boss);
        self.node_mut(boss)?.children.push(candidate);
        debug!("hired {} under {}", self.label(candidate), self.label(boss));
        Ok(())
    }

    fn transfer_subordinates(&mut self, from: StaffId, to: StaffId) -> DomainResult<()> {
        let moved = std::mem::take(&mut self.node_mut(from)?.children);
        for &report in &moved {
            self.node_mut(report)?.parent = Some(to);
        }
        trace!("moving {} reports from {} to {}", moved.len(), from, to);
        self.node_mut(to)?.children.extend(moved);
        Ok(())
    }

    fn detach(&mut self, boss: StaffId, target: StaffId) -> DomainResult<()> {
        let target_label = self.label(target);
        let boss_label = self.label(boss);
        let reports = &mut self.node_mut(boss)?.children;
        let position = reports
            .iter()
            .position(|&report| report == target)
            .ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "{} is not listed under {}",
                    target_label, boss_label
                ))
            })?;
        reports.remove(position);
        Ok(())
    }
}

/// Depth-first pre-order iterator over a chart, children in hiring order.
pub struct Preorder<'a> {
    chart: &'a OrgChart,
    stack: Vec<(StaffId, usize)>,
}

impl<'a> Preorder<'a> {
    fn new(chart: &'a OrgChart, start: StaffId) -> Self {
        Self {
            chart,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (StaffId, usize, &'a Staff);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.chart.arena.get(current.0) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, &node.data));
            }
        }
        None
    }
}
