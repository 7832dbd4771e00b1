//! Synchronizing from a host scene graph.

use cura_directive::{ObjectReference, SettingsMap};
use cura_fs::NormalizedPath;
use cura_sync::{
    BlockAction, Error, FileOutcome, LiveObjectEntry, LiveObjects, SyncConfig, Synchronizer,
};
use cura_test_utils::project::TestProject;
use pretty_assertions::assert_eq;

/// A minimal scene graph: top-level nodes are groups, meshes hang below.
struct Node {
    id: u64,
    mesh: Option<(NormalizedPath, ObjectReference, SettingsMap)>,
    children: Vec<Node>,
}

impl Node {
    fn group(id: u64, children: Vec<Node>) -> Self {
        Self {
            id,
            mesh: None,
            children,
        }
    }

    fn mesh(file: &NormalizedPath, object: ObjectReference, settings: &[(&str, i64)]) -> Self {
        let mut map = SettingsMap::new();
        for (key, value) in settings {
            map.insert(*key, *value).unwrap();
        }
        Self {
            id: 0,
            mesh: Some((file.clone(), object, map)),
            children: Vec::new(),
        }
    }
}

struct Scene {
    roots: Vec<Node>,
}

fn walk(node: &Node, top: u64, visit: &mut dyn FnMut(LiveObjectEntry)) {
    if let Some((file, object, settings)) = &node.mesh {
        visit(LiveObjectEntry::new(file.clone(), top, object.clone(), settings.clone()));
    }
    for child in &node.children {
        walk(child, top, visit);
    }
}

impl LiveObjects for Scene {
    fn visit(&self, visit: &mut dyn FnMut(LiveObjectEntry)) {
        for root in &self.roots {
            walk(root, root.id, visit);
        }
    }
}

const ASSEMBLY: &str = "assembly();\n/*cura-export 'base();' AS base 'lid();' AS lid*/\n";
const KNOB: &str = "knob();\n/*cura-export FILE 'knob.stl'*/\n";

#[test]
fn test_grouped_meshes_share_one_block() {
    let project = TestProject::new();
    let assembly = project.write_scad("assembly.scad", ASSEMBLY);
    let knob = project.write_scad("knob.scad", KNOB);

    let scene = Scene {
        roots: vec![
            Node::group(
                1,
                vec![
                    Node::mesh(&assembly, ObjectReference::inline("base();").named("base"), &[]),
                    Node::mesh(
                        &assembly,
                        ObjectReference::inline("lid();").named("lid"),
                        &[("wall_line_count", 4)],
                    ),
                ],
            ),
            Node::group(2, vec![Node::mesh(&knob, ObjectReference::file("knob.stl"), &[("top_layers", 6)])]),
        ],
    };

    let report = Synchronizer::new(SyncConfig::default()).sync(&scene);

    assert!(report.is_success());
    project.assert_file_eq(
        "assembly.scad",
        "assembly();\n/*cura-export\n  'base();' AS base\n  'lid();' AS lid SETTINGS\n    wall_line_count = 4\n*/\n",
    );
    project.assert_file_eq(
        "knob.scad",
        "knob();\n/*cura-export\n  FILE 'knob.stl' SETTINGS\n    top_layers = 6\n*/\n",
    );
    assert_eq!(
        project.file_names(),
        vec!["assembly.scad", "assembly.scad.old", "knob.scad", "knob.scad.old"]
    );
}

#[test]
fn test_group_across_files_leaves_both_untouched() {
    let project = TestProject::new();
    let assembly = project.write_scad("assembly.scad", ASSEMBLY);
    let knob = project.write_scad("knob.scad", KNOB);

    let scene = Scene {
        roots: vec![
            Node::group(
                1,
                vec![
                    Node::mesh(&assembly, ObjectReference::inline("base();").named("base"), &[]),
                    Node::mesh(&knob, ObjectReference::file("knob.stl"), &[]),
                ],
            ),
            Node::group(3, vec![Node::mesh(&assembly, ObjectReference::inline("lid();").named("lid"), &[])]),
        ],
    };

    let report = Synchronizer::new(SyncConfig::default()).sync(&scene);

    assert_eq!(report.group_failures.len(), 1);
    let Error::MultiFileGroup { group, files } = &report.group_failures[0] else {
        panic!("expected a multi-file group failure");
    };
    assert_eq!(group, "1");
    assert_eq!(files, &vec![assembly.to_string(), knob.to_string()]);

    project.assert_file_eq("assembly.scad", ASSEMBLY);
    project.assert_file_eq("knob.scad", KNOB);
    let assembly_report = report.file(&assembly).unwrap();
    assert!(matches!(assembly_report.outcome, FileOutcome::Unchanged));
    assert!(matches!(
        assembly_report.blocks[0].action,
        BlockAction::Conflicted { .. }
    ));
    // lid's group was never written
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].object.name(), "lid");
}

#[test]
fn test_config_file_enables_dry_run() {
    let project = TestProject::new();
    let knob = project.write_scad("knob.scad", KNOB);
    let config_path = project.write_scad("cura-sync.yaml", "dry_run: true\nbackup_extension: bak\n");

    let config = SyncConfig::load(&config_path).unwrap();
    assert!(config.dry_run);
    assert_eq!(config.backup_extension(), Some("bak"));

    let scene = Scene {
        roots: vec![Node::group(7, vec![Node::mesh(&knob, ObjectReference::file("knob.stl"), &[("top_layers", 2)])])],
    };
    let report = Synchronizer::new(config).sync(&scene);

    let FileOutcome::DryRun { diff } = &report.file(&knob).unwrap().outcome else {
        panic!("expected a dry run");
    };
    assert!(diff.contains("+    top_layers = 2"));
    project.assert_file_eq("knob.scad", KNOB);
    project.assert_file_not_exists("knob.scad.bak");
}
