//! Shared test utilities for walker and transfer tests
#![allow(dead_code)]

use std::ops::ControlFlow;

use async_trait::async_trait;

use common::node::{Node, ROOT_FOLDER_ID};
use common::prefix::TraversalPrefix;
use common::testkit::MemoryDrive;
use common::walker::Visitor;

pub const CALLER: &str = "caller-perm";
pub const TARGET: &str = "12345";
pub const TARGET_EMAIL: &str = "user@example.com";

/// Ids of the nodes in [`scenario_drive`]
pub struct Scenario {
    pub drive: MemoryDrive,
    pub a: String,
    pub a_file: String,
    pub b: String,
    pub b_file: String,
    pub z: String,
    pub z_file: String,
}

/// Build the tree
///
/// ```text
/// root
/// ├── A/
/// │   ├── a.txt
/// │   └── B/
/// │       └── b.txt
/// └── Z/
///     └── z.txt
/// ```
///
/// with every node owned by the caller and the target email registered.
pub fn scenario_drive() -> Scenario {
    let drive = MemoryDrive::new(CALLER);
    drive.register_email(TARGET_EMAIL, TARGET);

    let a = drive.add_folder(ROOT_FOLDER_ID, "A");
    let a_file = drive.add_file(&a, "a.txt");
    let b = drive.add_folder(&a, "B");
    let b_file = drive.add_file(&b, "b.txt");
    let z = drive.add_folder(ROOT_FOLDER_ID, "Z");
    let z_file = drive.add_file(&z, "z.txt");

    Scenario {
        drive,
        a,
        a_file,
        b,
        b_file,
        z,
        z_file,
    }
}

/// Visitor that records every visit as `(node id, display path)`
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    pub visits: Vec<(String, String)>,
    /// Break after this many visits
    pub stop_after: Option<usize>,
}

impl RecordingVisitor {
    pub fn stopping_after(visits: usize) -> Self {
        Self {
            visits: Vec::new(),
            stop_after: Some(visits),
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.visits.iter().map(|(_, path)| path.as_str()).collect()
    }

    pub fn count_for(&self, id: &str) -> usize {
        self.visits.iter().filter(|(v, _)| v == id).count()
    }
}

#[async_trait]
impl Visitor for RecordingVisitor {
    async fn visit(&mut self, node: &Node, parent: &TraversalPrefix) -> ControlFlow<()> {
        self.visits
            .push((node.id.clone(), node.display_path(parent)));
        match self.stop_after {
            Some(limit) if self.visits.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}
