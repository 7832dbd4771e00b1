//! Load a file, edit the loaded objects, save it back, load it again.

use assert_fs::prelude::*;
use cura_directive::{ObjectReference, SettingValue};
use cura_fs::NormalizedPath;
use cura_sync::{FileOutcome, LiveObjectEntry, SyncConfig, Synchronizer, read_document, read_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const BRACKET: &str = "\
include <lib.scad>

/*cura-export
  FILE 'bracket.stl' AS bracket SETTINGS
    support_enable = True,
    infill_sparse_density = 20
  'bolt();' AS bolt SETTINGS
    infill_mesh = True
*/
bracket();
/*cura-profile quality = 'fine'*/
";

/// Loaded objects as the host would create them: one group per section.
fn load(path: &NormalizedPath) -> Vec<LiveObjectEntry> {
    let read = read_file(path).unwrap();
    read.sections
        .iter()
        .enumerate()
        .flat_map(|(index, section)| {
            section.document.iter().map(move |(object, settings)| {
                LiveObjectEntry::new(
                    path.clone(),
                    format!("{path}#{index}"),
                    object.clone(),
                    settings.clone(),
                )
            })
        })
        .collect()
}

#[test]
fn test_extruder_round_trip() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("bracket.scad");
    file.write_str(BRACKET).unwrap();
    let path = NormalizedPath::new(file.path());

    let live: Vec<_> = load(&path)
        .into_iter()
        .map(|entry| entry.with_extruder("extruder_0"))
        .collect();
    let report = Synchronizer::new(SyncConfig::default()).sync(&live);
    assert!(report.is_success());

    file.assert(predicate::str::starts_with("include <lib.scad>\n\n/*cura-export\n"));
    file.assert(predicate::str::ends_with(
        "*/\nbracket();\n/*cura-profile quality = 'fine'*/\n",
    ));
    file.assert(predicate::str::contains(
        "  FILE 'bracket.stl' AS bracket SETTINGS\n    \
         support_enable = True,\n    \
         infill_sparse_density = 20,\n    \
         extruder = 'extruder_0'\n  \
         'bolt();' AS bolt SETTINGS\n    \
         infill_mesh = True\n*/",
    ));
    temp.child("bracket.scad.old").assert(BRACKET);

    let reloaded = read_file(&path).unwrap().merged().unwrap();
    let bracket = reloaded.get(&ObjectReference::file("x").named("bracket")).unwrap();
    assert_eq!(bracket.get("extruder"), Some(&SettingValue::from("extruder_0")));
    let bolt = reloaded.get(&ObjectReference::inline("").named("bolt")).unwrap();
    assert!(!bolt.contains_key("extruder"));
}

#[test]
fn test_sync_under_installed_subscriber() {
    cura_sync::logging::init().unwrap();

    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("bolt.scad");
    file.write_str("/*cura-export 'bolt();' AS bolt*/\nbolt();\n").unwrap();
    let path = NormalizedPath::new(file.path());

    let report = Synchronizer::new(SyncConfig::default()).sync(&load(&path));

    assert!(report.is_success());
    assert!(matches!(report.file(&path).unwrap().outcome, FileOutcome::Rewritten));
    file.assert("/*cura-export\n  'bolt();' AS bolt\n*/\nbolt();\n");
}

#[test]
fn test_removed_object_neutralizes_its_block() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("pair.scad");
    let original = "/*cura-export 'a();' AS a*/\na();\n/*cura-export 'b();' AS b*/\nb();\n";
    file.write_str(original).unwrap();
    let path = NormalizedPath::new(file.path());

    let live: Vec<_> = load(&path)
        .into_iter()
        .filter(|entry| entry.object.name() != "b")
        .collect();
    Synchronizer::new(SyncConfig::default()).sync(&live);

    file.assert("/*cura-export\n  'a();' AS a\n*/\na();\n/* cura-export 'b();' AS b*/\nb();\n");

    let reloaded = read_file(&path).unwrap();
    assert_eq!(reloaded.sections.len(), 1);
    assert_eq!(reloaded.sections[0].trailing, "\na();\n/* cura-export 'b();' AS b*/\nb();\n");
}

#[test]
fn test_lossless_read_and_stable_save() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("messy.scad");
    let original = "/*cura-export 'a' AS a SETTINGS x = 1*/ trailing /*cura-export ; broken*/\r\n\t/*cura-";
    file.write_str(original).unwrap();
    let path = NormalizedPath::new(file.path());

    let read = read_document(original);
    assert_eq!(read.to_text(), original);
    assert_eq!(read.diagnostics.len(), 2);

    let report = Synchronizer::new(SyncConfig::default()).sync(&load(&path));
    // the one live block is regenerated in canonical layout
    assert!(matches!(report.files[0].outcome, FileOutcome::Rewritten));
    file.assert(predicate::str::ends_with(" trailing /*cura-export ; broken*/\r\n\t/*cura-"));

    let second = Synchronizer::new(SyncConfig::default()).sync(&load(&path));
    assert!(matches!(second.files[0].outcome, FileOutcome::Unchanged));
}
