//! Structural properties of OrgChart across hire/fire sequences.

use rstest::rstest;

use orgtree::domain::{DomainError, OrgChart, Staff, StaffId, StaffKind, TreeRender};
use orgtree::util::testing;

/// Every parent/child edge must agree and levels must grow by one per edge.
fn assert_consistent(chart: &OrgChart) {
    chart.verify().unwrap();
    assert_eq!(chart.access_level(chart.root()).unwrap(), 0);
    for (id, depth, _) in chart.iter() {
        assert_eq!(chart.access_level(id).unwrap(), depth);
        assert_eq!(chart.find_root(id).unwrap(), chart.root());
        for &report in chart.subordinates(id) {
            assert_eq!(chart.boss(report), Some(id));
            assert_eq!(
                chart.access_level(report).unwrap(),
                chart.access_level(id).unwrap() + 1
            );
        }
    }
}

/// A chain root -> n1 -> n2 -> ... -> n{len}
fn chain(len: usize) -> (OrgChart, Vec<StaffId>) {
    let mut chart = OrgChart::new("root");
    let mut ids = vec![chart.root()];
    for i in 1..=len {
        let id = chart.recruit(&format!("n{}", i));
        chart.hire(ids[i - 1], id).unwrap();
        ids.push(id);
    }
    (chart, ids)
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(8)]
fn given_chain_when_querying_levels_then_level_equals_position(#[case] len: usize) {
    testing::init_test_setup();
    let (chart, ids) = chain(len);
    for (position, &id) in ids.iter().enumerate() {
        assert_eq!(chart.access_level(id).unwrap(), position);
    }
    assert_consistent(&chart);
}

#[rstest]
fn given_hire_when_succeeds_then_member_and_after_fire_not_member() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let x = chart.recruit("x");
    let y = chart.recruit("y");
    chart.hire(root, y).unwrap();

    assert!(!chart.is_member(x));
    chart.hire(root, x).unwrap();
    assert!(chart.is_member(x));

    chart.fire(x, y).unwrap();
    assert!(!chart.is_member(x));
    assert_consistent(&chart);
}

#[rstest]
fn given_middle_of_chain_when_fired_then_reports_move_to_replacement() {
    let (mut chart, ids) = chain(4);
    let newcomer = chart.recruit("new");

    chart.fire(ids[2], newcomer).unwrap();

    assert_eq!(chart.boss(newcomer), Some(ids[1]));
    assert_eq!(chart.subordinates(newcomer), &[ids[3]]);
    assert_eq!(chart.access_level(ids[4]).unwrap(), 4);
    assert_eq!(chart.headcount(), 5);
    assert_consistent(&chart);
}

#[rstest]
fn given_replacement_with_own_reports_when_firing_then_reports_are_appended() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let [x, y, x1, y1] = ["x", "y", "x1", "y1"].map(|n| chart.recruit(n));
    chart.hire(root, x).unwrap();
    chart.hire(root, y).unwrap();
    chart.hire(x, x1).unwrap();
    chart.hire(y, y1).unwrap();

    chart.fire(x, y).unwrap();

    assert_eq!(chart.subordinates(y), &[y1, x1]);
    assert_eq!(chart.subordinates(root), &[y]);
    assert_consistent(&chart);
}

#[rstest]
fn given_freestanding_team_when_used_as_replacement_then_hired_as_unit() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let [x, x1, lead, member] = ["x", "x1", "lead", "member"].map(|n| chart.recruit(n));
    chart.hire(root, x).unwrap();
    chart.hire(x, x1).unwrap();
    chart.hire(lead, member).unwrap();

    chart.fire(x, lead).unwrap();

    assert_eq!(chart.boss(lead), Some(root));
    assert_eq!(chart.subordinates(lead), &[member, x1]);
    assert!(chart.is_member(member));
    assert_consistent(&chart);
}

#[rstest]
fn given_replacement_inside_freestanding_team_when_firing_then_rejected_unchanged() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let [x, lead, member] = ["x", "lead", "member"].map(|n| chart.recruit(n));
    chart.hire(root, x).unwrap();
    chart.hire(lead, member).unwrap();
    let before: Vec<String> = chart.outline().collect();

    let err = chart.fire(x, member).unwrap_err();

    assert_eq!(err, DomainError::AlreadyHired("member".into()));
    assert_eq!(chart.outline().collect::<Vec<_>>(), before);
    assert!(chart.is_member(x));
}

#[rstest]
fn given_replacement_of_other_kind_when_firing_then_type_mismatch_unchanged() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let x = chart.recruit("x");
    chart.hire(root, x).unwrap();
    let temp = chart.recruit_as(Staff::employee("temp"));

    let err = chart.fire(x, temp).unwrap_err();

    assert!(matches!(
        err,
        DomainError::TypeMismatch {
            found: StaffKind::Employee,
            ..
        }
    ));
    assert!(chart.is_member(x));
    assert_consistent(&chart);
}

#[rstest]
fn given_employee_chart_when_hiring_staff_then_type_mismatch() {
    let mut chart = OrgChart::with_root(Staff::employee("foreman"));
    let root = chart.root();
    let worker = chart.recruit_as(Staff::employee("worker"));
    let manager = chart.recruit("manager");

    chart.hire(root, worker).unwrap();
    let err = chart.hire(root, manager).unwrap_err();
    assert_eq!(
        err.to_string(),
        "can not hire manager: expected employee, found staff"
    );
}

#[rstest]
fn given_non_member_target_when_firing_then_not_member() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let x = chart.recruit("x");
    let outsider = chart.recruit("outsider");
    chart.hire(root, x).unwrap();

    let err = chart.fire(outsider, x).unwrap_err();
    assert_eq!(
        err.to_string(),
        "can not fire colleague outsider: not a member of the organization"
    );
}

#[rstest]
fn given_many_fires_when_done_then_structure_stays_consistent() {
    let mut chart = OrgChart::new("root");
    let root = chart.root();
    let mut staff = Vec::new();
    for i in 0..12 {
        let id = chart.recruit(&format!("s{}", i));
        let boss = if i < 3 { root } else { staff[i % 3] };
        chart.hire(boss, id).unwrap();
        staff.push(id);
    }
    assert_eq!(chart.headcount(), 13);

    // fire the three middle managers one after the other, each time to the next one
    chart.fire(staff[0], staff[1]).unwrap();
    assert_consistent(&chart);
    chart.fire(staff[1], staff[2]).unwrap();
    assert_consistent(&chart);

    assert_eq!(chart.headcount(), 11);
    assert_eq!(chart.subordinates(root), &[staff[2]]);
    assert_eq!(chart.subordinates(staff[2]).len(), 9);
}

#[rstest]
fn given_chart_when_rendering_tree_then_root_first_and_all_lines() {
    let (chart, _) = chain(2);
    let rendered = chart.to_tree().to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "root");
    assert!(lines[2].ends_with("n2"));
}
