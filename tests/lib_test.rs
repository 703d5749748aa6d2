//! Library integration tests.

use prerelease_updater::UpdaterError;

#[test]
fn error_types_are_public() {
    let err = UpdaterError::UnknownCommand {
        name: "workbench.action.unknown".into(),
    };
    assert!(err.to_string().contains("workbench.action.unknown"));
    assert_eq!(err.kind(), "unknown_command");
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> prerelease_updater::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use prerelease_updater::cli::{Cli, Commands};

    let cli = Cli::parse_from(["prerelease-updater", "status", "--json", "--remote"]);
    if let Some(Commands::Status(args)) = cli.command {
        assert!(args.json);
        assert!(args.remote);
    } else {
        panic!("Expected Status command");
    }
}

#[test]
fn version_arbitration_is_public() {
    use prerelease_updater::updates::{is_alpha, should_install, version_from_artifact_url};

    let candidate =
        version_from_artifact_url("https://github.com/x/releases/download/v3/tabnine-vscode-3.2.0-alpha.7.vsix")
            .unwrap();
    assert_eq!(candidate, "3.2.0-alpha.7");
    assert!(is_alpha(&candidate));
    assert!(should_install(Some("3.1.9"), &candidate));
    assert!(!should_install(Some("3.2.1"), &candidate));
}

#[test]
fn engine_arguments_snapshot() {
    use prerelease_updater::enterprise::binary_args;

    insta::assert_snapshot!(binary_args("https://tabnine.corp").join("\n"), @r"
    --no_bootstrap
    --cloud2_url=https://tabnine.corp
    --client=vscode-enterprise
    ");
}

#[test]
fn registry_rejects_unknown_commands() {
    use prerelease_updater::host::CommandRegistry;
    use prerelease_updater::ui::MockUI;

    let mut registry = CommandRegistry::new();
    let mut ui = MockUI::new();
    let err = registry
        .execute("workbench.action.missing", &[], &mut ui)
        .unwrap_err();
    assert!(matches!(err, UpdaterError::UnknownCommand { .. }));
}
