mod common;

use std::path::{Path, PathBuf};

use stargate::files::{FileSet, FileSetCollector};
use stargate::fs::RealFileSystem;
use stargate::fs::mock::MockFileSystem;

use common::{relative, tree};

#[test]
fn overlapping_patterns_yield_each_path_once() {
    let dir = tree(&["src/top.v", "src/alu.v", "src/sub/mul.v"]);
    let rtl = FileSet::with_patterns("rtl", ["src/*.v", "src/**/*.v"]);
    let top = FileSet::with_patterns("top", ["src/top.v"]);

    let mut collector = FileSetCollector::new(dir.path());
    collector.add_fileset(&rtl);
    collector.add_fileset(&top);
    let paths = collector.collect(&RealFileSystem).unwrap();

    assert_eq!(
        relative(dir.path(), &paths),
        vec!["src/alu.v", "src/top.v", "src/sub/mul.v"]
    );
}

#[test]
fn paths_keep_the_position_of_their_first_match() {
    let fs = MockFileSystem::new();
    fs.add_file("/p/pkg/defs.svh", "");
    fs.add_file("/p/rtl/a.sv", "");
    fs.add_file("/p/rtl/b.sv", "");

    let headers = FileSet::with_patterns("headers", ["pkg/*.svh"]);
    let rtl = FileSet::with_patterns("rtl", ["rtl/b.sv", "rtl/*.sv", "pkg/*.svh"]);

    let mut collector = FileSetCollector::new("/p");
    collector.add_fileset(&headers);
    collector.add_fileset(&rtl);
    let paths = collector.collect(&fs).unwrap();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("/p/pkg/defs.svh"),
            PathBuf::from("/p/rtl/b.sv"),
            PathBuf::from("/p/rtl/a.sv"),
        ]
    );
}

#[test]
fn collecting_twice_gives_the_same_list() {
    let dir = tree(&["src/a.v", "src/b.v", "tb/a_tb.sv"]);
    let rtl = FileSet::with_patterns("rtl", ["src/*.v"]);
    let tb = FileSet::with_patterns("tb", ["tb/*.sv", "src/a.v"]);

    let mut collector = FileSetCollector::new(dir.path());
    collector.add_fileset(&rtl);
    collector.add_fileset(&tb);

    let first = collector.collect(&RealFileSystem).unwrap();
    let second = collector.collect(&RealFileSystem).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn same_file_set_registered_twice_adds_nothing() {
    let fs = MockFileSystem::new();
    fs.add_file("/p/a.v", "");

    let rtl = FileSet::with_patterns("rtl", ["*.v", "*.v"]);
    let mut collector = FileSetCollector::new(Path::new("/p"));
    collector.add_fileset(&rtl);
    collector.add_fileset(&rtl);

    assert_eq!(collector.collect(&fs).unwrap(), vec![PathBuf::from("/p/a.v")]);
}

#[test]
fn empty_collector_yields_nothing() {
    let fs = MockFileSystem::new();
    let collector = FileSetCollector::new("/p");

    assert!(collector.collect(&fs).unwrap().is_empty());
}

#[test]
fn file_set_patterns_keep_declaration_order_and_duplicates() {
    let mut set = FileSet::new("rtl");
    set.add_pattern("b/*.v");
    set.add_pattern("a/*.v");
    set.add_pattern("b/*.v");

    assert_eq!(set.name(), "rtl");
    assert_eq!(set.patterns(), ["b/*.v", "a/*.v", "b/*.v"]);
}
