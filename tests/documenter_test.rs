//! Integration tests for the file and directory documentation workflows,
//! using stub providers so no network is involved.

mod common;

use common::{EchoDocProvider, FailingProvider, create_mock_project, create_temp_dir};
use docsmith::archive::ArchiveManager;
use docsmith::documenter::{
    DirectoryDocumenter, DocumentOutcome, FileDocumenter, RedocumentPolicy, RunOptions,
    SkipReason,
};
use docsmith::llm::CompletionClient;
use std::path::Path;

fn echo_client() -> CompletionClient {
    CompletionClient::new(Box::new(EchoDocProvider))
}

fn failing_client() -> CompletionClient {
    CompletionClient::new(Box::new(FailingProvider))
}

#[tokio::test]
async fn test_document_archives_then_overwrites() {
    let dir = create_temp_dir();
    let root = create_mock_project(&dir, &[("a.py", "print('hi')\n")]);
    let source = root.join("a.py");

    let client = echo_client();
    let documenter = FileDocumenter::new(&client);
    let outcome = documenter.document(&source).await;

    let DocumentOutcome::Documented { archive_path } = outcome else {
        panic!("expected Documented, got {:?}", outcome);
    };

    // Archive holds the pre-call content, source holds the completion result
    assert_eq!(archive_path, root.join("a_doc_archive.py"));
    assert_eq!(
        std::fs::read_to_string(&archive_path).unwrap(),
        "print('hi')\n"
    );
    assert_eq!(
        std::fs::read_to_string(&source).unwrap(),
        "# documented\nprint('hi')\n"
    );
}

#[tokio::test]
async fn test_completion_failure_leaves_file_untouched_and_unarchived() {
    let dir = create_temp_dir();
    let root = create_mock_project(&dir, &[("a.py", "print('hi')\n")]);
    let source = root.join("a.py");

    let client = failing_client();
    let documenter = FileDocumenter::new(&client);
    let outcome = documenter.document(&source).await;

    assert!(matches!(outcome, DocumentOutcome::Failed(_)));
    assert_eq!(
        std::fs::read_to_string(&source).unwrap(),
        "print('hi')\n"
    );
    assert!(!ArchiveManager::archive_path_for(&source).exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_archive_failure_leaves_file_untouched() {
    use std::os::unix::fs::PermissionsExt;

    let dir = create_temp_dir();
    let root = create_mock_project(&dir, &[("locked/a.py", "print('hi')\n")]);
    let locked = root.join("locked");
    let source = locked.join("a.py");

    // Read-only directory: the source is readable but the archive copy
    // cannot be created
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    let client = echo_client();
    let documenter = FileDocumenter::new(&client);
    let outcome = documenter.document(&source).await;

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(outcome, DocumentOutcome::Failed(_)));
    assert_eq!(
        std::fs::read_to_string(&source).unwrap(),
        "print('hi')\n"
    );
    assert!(!ArchiveManager::archive_path_for(&source).exists());
}

#[tokio::test]
async fn test_skips_non_source_empty_and_archive_files() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[
            ("notes.txt", "plain text\n"),
            ("empty.py", ""),
            ("a_doc_archive.py", "old content\n"),
        ],
    );

    let client = echo_client();
    let documenter = FileDocumenter::new(&client);

    let outcome = documenter.document(&root.join("notes.txt")).await;
    assert!(matches!(
        outcome,
        DocumentOutcome::Skipped(SkipReason::NotSource)
    ));

    let outcome = documenter.document(&root.join("empty.py")).await;
    assert!(matches!(
        outcome,
        DocumentOutcome::Skipped(SkipReason::Empty)
    ));

    let outcome = documenter.document(&root.join("a_doc_archive.py")).await;
    assert!(matches!(
        outcome,
        DocumentOutcome::Skipped(SkipReason::Archive)
    ));
}

#[tokio::test]
async fn test_redocument_policy_skip_vs_overwrite() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[
            ("a.py", "print('new')\n"),
            ("a_doc_archive.py", "print('old')\n"),
        ],
    );
    let source = root.join("a.py");

    let client = echo_client();

    // Skip policy: the existing archive marks the file as already documented
    let documenter = FileDocumenter::new(&client).with_policy(RedocumentPolicy::Skip);
    let outcome = documenter.document(&source).await;
    assert!(matches!(
        outcome,
        DocumentOutcome::Skipped(SkipReason::AlreadyDocumented)
    ));
    assert_eq!(
        std::fs::read_to_string(root.join("a_doc_archive.py")).unwrap(),
        "print('old')\n"
    );

    // Overwrite policy (default): re-document and replace the archive
    let documenter = FileDocumenter::new(&client).with_policy(RedocumentPolicy::Overwrite);
    let outcome = documenter.document(&source).await;
    assert!(matches!(outcome, DocumentOutcome::Documented { .. }));
    assert_eq!(
        std::fs::read_to_string(root.join("a_doc_archive.py")).unwrap(),
        "print('new')\n"
    );
}

#[tokio::test]
async fn test_directory_run_report_counts() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[
            ("a.py", "print('a')\n"),
            ("notes.txt", "not source\n"),
            ("sub/b.rs", "fn b() {}\n"),
            ("sub/readme.md", "# readme\n"),
        ],
    );

    let client = echo_client();
    let documenter = DirectoryDocumenter::new(&client, RunOptions::default());
    let report = documenter.generate(&root).await.unwrap();

    // 2 eligible + 2 ineligible
    assert_eq!(report.documented, 2);
    assert_eq!(report.skipped, 2);
    assert!(report.failed.is_empty());
    assert_eq!(report.total(), 4);
}

#[tokio::test]
async fn test_directory_run_continues_past_failures() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[
            ("a.py", "print('a')\n"),
            ("b.py", "print('b')\n"),
            ("notes.txt", "not source\n"),
        ],
    );

    let client = failing_client();
    let documenter = DirectoryDocumenter::new(&client, RunOptions::default());
    let report = documenter.generate(&root).await.unwrap();

    // Every eligible file is attempted and reported, none documented
    assert_eq!(report.documented, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.documented + report.failed.len(), 2);

    // Originals survive, no archives created
    assert_eq!(std::fs::read_to_string(root.join("a.py")).unwrap(), "print('a')\n");
    assert!(!root.join("a_doc_archive.py").exists());
    assert!(!root.join("b_doc_archive.py").exists());

    // Every failed path carries its reason
    for (path, reason) in &report.failed {
        assert!(path.exists());
        assert!(reason.contains("simulated completion failure"));
    }
}

#[tokio::test]
async fn test_spec_scenario_one_source_one_text_file() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[("a.py", "print('hello')\n"), ("notes.txt", "notes\n")],
    );

    let client = echo_client();
    let documenter = DirectoryDocumenter::new(&client, RunOptions::default());
    let report = documenter.generate(&root).await.unwrap();

    assert_eq!(report.documented, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.failed.is_empty());

    assert_eq!(
        std::fs::read_to_string(root.join("a_doc_archive.py")).unwrap(),
        "print('hello')\n"
    );
    assert!(
        std::fs::read_to_string(root.join("a.py"))
            .unwrap()
            .starts_with("# documented")
    );
    assert_eq!(
        std::fs::read_to_string(root.join("notes.txt")).unwrap(),
        "notes\n"
    );
}

#[tokio::test]
async fn test_second_run_skips_archives_created_by_first() {
    let dir = create_temp_dir();
    let root = create_mock_project(&dir, &[("a.py", "print('hi')\n")]);

    let client = echo_client();
    let documenter = DirectoryDocumenter::new(&client, RunOptions::default());

    let first = documenter.generate(&root).await.unwrap();
    assert_eq!(first.documented, 1);

    // The archive from the first run is visible to the second walk and must
    // be skipped, not documented
    let second = documenter.generate(&root).await.unwrap();
    assert_eq!(second.documented, 1);
    assert_eq!(second.skipped, 1);
}

#[tokio::test]
async fn test_delete_archives_pass_through() {
    let dir = create_temp_dir();
    let root = create_mock_project(&dir, &[("a.py", "print('hi')\n")]);

    let client = echo_client();
    let documenter = DirectoryDocumenter::new(&client, RunOptions::default());
    documenter.generate(&root).await.unwrap();
    assert!(root.join("a_doc_archive.py").exists());

    let report = documenter.delete_archives(&root).unwrap();
    assert_eq!(report.deleted, 1);
    assert!(!root.join("a_doc_archive.py").exists());
}

#[tokio::test]
async fn test_exclude_patterns_limit_the_run() {
    let dir = create_temp_dir();
    let root = create_mock_project(
        &dir,
        &[("a.py", "print('a')\n"), ("vendor/b.py", "print('b')\n")],
    );

    let client = echo_client();
    let options = RunOptions {
        exclude: vec!["**/vendor/**".to_string()],
        ..RunOptions::default()
    };
    let documenter = DirectoryDocumenter::new(&client, options);
    let report = documenter.generate(&root).await.unwrap();

    assert_eq!(report.documented, 1);
    assert!(!Path::new(&root.join("vendor/b_doc_archive.py")).exists());
    assert_eq!(
        std::fs::read_to_string(root.join("vendor/b.py")).unwrap(),
        "print('b')\n"
    );
}
