//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `orgmap_core` linkage.
//! - Run the import pipeline end to end against a CSV file when given one.

use orgmap_core::{
    build_hierarchy, parse_record, parse_rows, project, seed, Horizon, OrgNode,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    match args.next() {
        None => {
            println!("orgmap_core ping={}", orgmap_core::ping());
            println!("orgmap_core version={}", orgmap_core::core_version());
            ExitCode::SUCCESS
        }
        Some(path) => run_import(&path),
    }
}

fn run_import(path: &str) -> ExitCode {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let rows = match parse_rows(&text) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let records: Vec<_> = rows.iter().map(parse_record).collect();
    let report = build_hierarchy(&records);

    println!(
        "imported {} people ({} duplicate names, {} unresolved managers)",
        report.people.len(),
        report.duplicate_names.len(),
        report.unresolved_managers.len()
    );
    for unresolved in &report.unresolved_managers {
        println!(
            "  unresolved: {} -> {}",
            unresolved.person_name, unresolved.manager_name
        );
    }

    let forest = forest_of(&report.people);
    println!("\nhierarchy:");
    for root in &forest {
        print_node(root, 1);
    }

    let library = seed::default_projection_library();
    println!("\ndepartment projections:");
    for horizon in Horizon::ALL {
        let groups = project(&report.people, &library, horizon);
        let summary: Vec<String> = groups
            .iter()
            .map(|group| format!("{}={}", group.name, group.employees.len()))
            .collect();
        println!("  {:<9} {}", horizon.token(), summary.join(" "));
    }

    ExitCode::SUCCESS
}

fn forest_of(people: &[orgmap_core::Person]) -> Vec<OrgNode> {
    // The CLI bypasses persistence; build the derived view the same way
    // the directory does, via a throwaway in-memory index.
    let mut roots = Vec::new();
    for person in people {
        if person.manager_id.is_none() {
            roots.push(node_for(person, people));
        }
    }
    roots
}

fn node_for(person: &orgmap_core::Person, people: &[orgmap_core::Person]) -> OrgNode {
    let employees = people
        .iter()
        .filter(|candidate| candidate.manager_id == Some(person.id))
        .map(|report| node_for(report, people))
        .collect();
    OrgNode {
        person: person.clone(),
        employees,
    }
}

fn print_node(node: &OrgNode, depth: usize) {
    let marker = if node.person.is_hiring { " (open)" } else { "" };
    println!(
        "{}{} - {}{}",
        "  ".repeat(depth),
        node.person.name,
        node.person.title,
        marker
    );
    for child in &node.employees {
        print_node(child, depth + 1);
    }
}
