use docket_scanner::{lazy_file_count, ScanConfig, ScanRoots, TreeScanner};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scanner_for(flat: &Path) -> TreeScanner {
    TreeScanner::new(
        ScanRoots {
            flat_roots: vec![flat.to_path_buf()],
            year_base: None,
            year_prefix: String::new(),
        },
        ScanConfig::default(),
    )
}

fn year_scanner(base: &Path) -> TreeScanner {
    TreeScanner::new(
        ScanRoots {
            flat_roots: Vec::new(),
            year_base: Some(base.to_path_buf()),
            year_prefix: "Jobs ".to_string(),
        },
        ScanConfig::default(),
    )
}

#[tokio::test]
async fn finds_docket_folder_in_flat_root() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir(temp.path().join("25464 Night Mix")).expect("mkdir");
    fs::create_dir(temp.path().join("31002 Other Job")).expect("mkdir");

    let found = scanner_for(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    let hit = &found[0];
    assert_eq!(hit.display_name, "25464 Night Mix");
    assert_eq!(hit.matched_identifier, "25464");
    assert_eq!(hit.file_count, 0);
    assert!(hit.modified_at.is_some());
    assert!(hit.locator.ends_with("25464 Night Mix"));
}

#[tokio::test]
async fn matches_file_entries_too() {
    let temp = TempDir::new().expect("tempdir");
    let sessions = temp.path().join("2024 Sessions");
    fs::create_dir(&sessions).expect("mkdir");
    fs::write(sessions.join("25464.wav"), b"riff").expect("write");

    let found = scanner_for(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464.wav");
}

#[tokio::test]
async fn digit_pruning_hides_entries_under_digitless_directories() {
    let temp = TempDir::new().expect("tempdir");
    let archive = temp.path().join("Archive");
    fs::create_dir(&archive).expect("mkdir");
    fs::write(archive.join("25464.wav"), b"riff").expect("write");

    // The file exists one level inside, but "Archive" has no digits and the
    // whole subtree is skipped. Documented limitation.
    let found = scanner_for(temp.path()).search("25464").await;
    assert_eq!(found, Vec::new());
}

#[tokio::test]
async fn depth_limit_halts_descent() {
    let temp = TempDir::new().expect("tempdir");
    let level3 = temp
        .path()
        .join("10 sessions")
        .join("20 mixes")
        .join("30 stems");
    fs::create_dir_all(level3.join("25464 too deep")).expect("mkdir");
    fs::create_dir(temp.path().join("10 sessions").join("25464 in range")).expect("mkdir");

    let found = scanner_for(temp.path()).search("25464").await;

    let names: Vec<&str> = found.iter().map(|m| m.display_name.as_str()).collect();
    assert!(names.contains(&"25464 in range"));
    assert!(!names.contains(&"25464 too deep"));
}

#[tokio::test]
async fn progressive_prefix_query_matches_folder() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir(temp.path().join("25464-AB Project")).expect("mkdir");

    let found = scanner_for(temp.path()).search("254").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].matched_identifier, "25464-AB");
}

#[tokio::test]
async fn empty_query_scans_nothing() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir(temp.path().join("25464 Night Mix")).expect("mkdir");

    assert_eq!(scanner_for(temp.path()).search("   ").await, Vec::new());
}

#[tokio::test]
async fn old_year_root_still_surfaces_through_shallow_pass() {
    let temp = TempDir::new().expect("tempdir");
    for year in ["2022", "2023", "2024", "2025"] {
        fs::create_dir(temp.path().join(format!("Jobs {year}"))).expect("mkdir");
    }
    // The docket folder only exists under 2022, outside the deep-scan set.
    fs::create_dir(temp.path().join("Jobs 2022").join("25464 Masters")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Masters");
}

#[tokio::test]
async fn old_year_root_is_not_deep_scanned() {
    let temp = TempDir::new().expect("tempdir");
    for year in ["2022", "2023", "2024", "2025"] {
        fs::create_dir(temp.path().join(format!("Jobs {year}"))).expect("mkdir");
    }
    // Nested one level down inside the old year: only reachable by recursion,
    // which the shallow pass never does.
    let nested = temp.path().join("Jobs 2022").join("100 Mixes");
    fs::create_dir_all(nested.join("25464 Masters")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;
    assert_eq!(found, Vec::new());
}

#[tokio::test]
async fn recent_year_root_is_deep_scanned() {
    let temp = TempDir::new().expect("tempdir");
    for year in ["2022", "2023", "2024", "2025"] {
        fs::create_dir(temp.path().join(format!("Jobs {year}"))).expect("mkdir");
    }
    let nested = temp.path().join("Jobs 2025").join("100 Mixes");
    fs::create_dir_all(nested.join("25464 Masters")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Masters");
}

#[tokio::test]
async fn backups_folder_gets_one_extra_level_in_recent_years() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir(temp.path().join("Jobs 2025")).expect("mkdir");
    // Deliverables under Backups nest one level deeper; the Backups folder
    // itself has no digits but is still descended into during deep year scans.
    let backups = temp.path().join("Jobs 2025").join("Backups");
    fs::create_dir_all(backups.join("25464 Deliverables")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Deliverables");
}

#[tokio::test]
async fn digit_bearing_backups_folder_also_gets_extra_level() {
    let temp = TempDir::new().expect("tempdir");
    // The backups folder sits at the depth frontier and its name carries
    // digits; deliverables below it are only reachable through the extended
    // limit, not through the normal descent.
    let backups = temp
        .path()
        .join("Jobs 2025")
        .join("100 Mixes")
        .join("Backups 2024");
    fs::create_dir_all(backups.join("900 Sessions").join("25464 Masters")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Masters");
}

#[tokio::test]
async fn stray_multibyte_entry_under_year_base_is_ignored() {
    let temp = TempDir::new().expect("tempdir");
    // A non-conforming name with a multibyte character across the prefix
    // boundary must not take down the year scan.
    fs::create_dir(temp.path().join("Jobsü2025")).expect("mkdir");
    fs::create_dir_all(temp.path().join("Jobs 2025").join("25464 Real")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Real");
}

#[tokio::test]
async fn backups_folder_is_pruned_in_flat_roots() {
    let temp = TempDir::new().expect("tempdir");
    let backups = temp.path().join("Backups");
    fs::create_dir_all(backups.join("25464 Deliverables")).expect("mkdir");

    assert_eq!(scanner_for(temp.path()).search("25464").await, Vec::new());
}

#[tokio::test]
async fn non_year_directories_under_base_are_ignored() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir(temp.path().join("Jobs misc")).expect("mkdir");
    fs::create_dir_all(temp.path().join("Jobs misc").join("25464 Stray")).expect("mkdir");
    fs::create_dir(temp.path().join("Jobs 2025")).expect("mkdir");
    fs::create_dir(temp.path().join("Jobs 2025").join("25464 Real")).expect("mkdir");

    let found = year_scanner(temp.path()).search("25464").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "25464 Real");
}

#[tokio::test]
async fn file_count_is_lazy() {
    let temp = TempDir::new().expect("tempdir");
    let folder = temp.path().join("25464 Night Mix");
    fs::create_dir(&folder).expect("mkdir");
    fs::write(folder.join("a.wav"), b"riff").expect("write");
    fs::write(folder.join("b.wav"), b"riff").expect("write");
    fs::create_dir(folder.join("90 stems")).expect("mkdir");

    let found = scanner_for(temp.path()).search("25464").await;
    assert_eq!(found[0].file_count, 0);

    let count = lazy_file_count(&folder).await.expect("count");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn missing_root_degrades_to_empty() {
    let temp = TempDir::new().expect("tempdir");
    let gone = temp.path().join("does-not-exist");

    assert_eq!(scanner_for(&gone).search("25464").await, Vec::new());
}
