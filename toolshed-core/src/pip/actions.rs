use super::{OutdatedPackage, Pip, parse_outdated};
use crate::{
    batch,
    config::PipConfig,
    menu::{Menu, MenuEntry},
    session::{Reporting, Session},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipAction {
    ListAll,
    ListOutdated,
    UpdateAll,
    UpdateRequirements,
}

impl MenuEntry for PipAction {
    const ALL: &'static [Self] = &[
        Self::ListAll,
        Self::ListOutdated,
        Self::UpdateAll,
        Self::UpdateRequirements,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::ListAll => "1",
            Self::ListOutdated => "2",
            Self::UpdateAll => "3",
            Self::UpdateRequirements => "4",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ListAll => "List all packages",
            Self::ListOutdated => "List outdated packages",
            Self::UpdateAll => "Update all packages",
            Self::UpdateRequirements => "Update requirements file",
        }
    }
}

pub fn run_pip_manager(session: &mut Session<'_>, config: &PipConfig) -> Result<()> {
    let pip = Pip::new(&config.python);
    let requirements = config.resolved_requirements_file();
    Menu::<PipAction>::new("=== Python Package Manager ===", "0", "Exit")
        .farewell("Exiting.")
        .run(session, |session, action| match action {
            PipAction::ListAll => list_all(session, &pip),
            PipAction::ListOutdated => list_outdated(session, &pip),
            PipAction::UpdateAll => update_all(session, &pip),
            PipAction::UpdateRequirements => update_requirements(session, &pip, &requirements),
        })
}

fn print_listing(session: &mut Session<'_>, pip_output: &str) {
    if !pip_output.is_empty() {
        session.console.line(pip_output);
    }
}

pub fn list_all(session: &mut Session<'_>, pip: &Pip) -> Result<()> {
    session.console.info("Installed packages:");
    let result = session.run(&pip.list(), Reporting::Report)?;
    if result.success {
        print_listing(session, &result.stdout);
    }
    Ok(())
}

pub fn list_outdated(session: &mut Session<'_>, pip: &Pip) -> Result<()> {
    session.console.info("Outdated packages:");
    let result = session.run(&pip.list_outdated(), Reporting::Report)?;
    if result.success {
        if result.stdout.is_empty() {
            session.console.success("All packages are up to date.");
        } else {
            print_listing(session, &result.stdout);
        }
    }
    Ok(())
}

/// Upgrade every outdated package, one `pip install --upgrade` per package.
pub fn update_all(session: &mut Session<'_>, pip: &Pip) -> Result<()> {
    session.console.info("Checking for outdated packages...");
    let result = session.run(&pip.list_outdated_json(), Reporting::Report)?;
    if !result.success {
        return Ok(());
    }

    let packages = match parse_outdated(&result.stdout) {
        Ok(packages) => packages,
        Err(err) => {
            log::warn!("{err:#}: {:?}", result.stdout);
            session.console.error(&format!("{err:#}"));
            return Ok(());
        }
    };

    if packages.is_empty() {
        session.console.success("All packages are up to date.");
        return Ok(());
    }

    session.console.blank();
    session
        .console
        .info("The following packages have newer versions:");
    session
        .console
        .bullets(packages.iter().map(OutdatedPackage::summary));
    session.console.blank();

    if !session.console.confirm("Upgrade all of them?")? {
        session.console.info("Aborted. No packages were upgraded.");
        return Ok(());
    }

    let outcome = batch::run_each(
        session,
        &packages,
        |package| package.name.clone(),
        |package| format!("   Upgrading {}...", package.name),
        |package| pip.upgrade(&package.name),
    )?;
    batch::report(session, &outcome, "All packages updated.");
    Ok(())
}

/// Overwrite `path` with the output of `pip freeze`.
pub fn update_requirements(session: &mut Session<'_>, pip: &Pip, path: &Path) -> Result<()> {
    session.console.info(&format!(
        "Updating {} with current package versions...",
        path.display()
    ));
    let result = session.run(&pip.freeze(), Reporting::Report)?;
    if !result.success {
        return Ok(());
    }

    let mut contents = result.stdout;
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    session
        .console
        .success(&format!("{} updated.", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        process::{CommandResult, mock::MockRunner},
        test_utils::scripted_console,
    };

    const OUTDATED: &str = r#"[
        {"name": "requests", "version": "2.31.0", "latest_version": "2.32.3"},
        {"name": "rich", "version": "13.7.0", "latest_version": "13.9.4"}
    ]"#;

    fn pip() -> Pip {
        Pip::new("python3")
    }

    #[test]
    fn test_menu_lists_entries_and_exits_on_zero() {
        let runner = MockRunner::new();
        let (console, out) = scripted_console("0\n");
        let mut session = Session::new(console, &runner);

        run_pip_manager(&mut session, &PipConfig::default()).unwrap();

        let output = out.contents();
        assert!(output.contains("=== Python Package Manager ==="));
        assert!(output.contains("4 : Update requirements file\n0 : Exit\n"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_update_all_upgrades_each_package() {
        let runner = MockRunner::new()
            .respond(
                "python3 -m pip list --outdated --format=json",
                CommandResult::ok(OUTDATED),
            )
            .respond(
                "python3 -m pip install --upgrade requests",
                CommandResult::failed("ERROR: network unreachable"),
            );
        let (console, out) = scripted_console("y\n");
        let mut session = Session::new(console, &runner);

        update_all(&mut session, &pip()).unwrap();

        assert_eq!(
            runner.calls_starting_with("python3 -m pip install"),
            vec![
                "python3 -m pip install --upgrade requests",
                "python3 -m pip install --upgrade rich"
            ]
        );
        let output = out.contents();
        assert!(output.contains("  - requests 2.31.0 -> 2.32.3\n"));
        assert!(output.contains("1 of 2 failed: requests"));
    }

    #[test]
    fn test_update_all_declined() {
        let runner = MockRunner::new().respond(
            "python3 -m pip list --outdated --format=json",
            CommandResult::ok(OUTDATED),
        );
        let (console, out) = scripted_console("n\n");
        let mut session = Session::new(console, &runner);

        update_all(&mut session, &pip()).unwrap();

        assert!(out.contents().contains("No packages were upgraded."));
        assert!(runner.calls_starting_with("python3 -m pip install").is_empty());
    }

    #[test]
    fn test_update_all_nothing_outdated() {
        let runner = MockRunner::new().respond(
            "python3 -m pip list --outdated --format=json",
            CommandResult::ok("[]"),
        );
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        update_all(&mut session, &pip()).unwrap();
        assert!(out.contents().contains("✅  All packages are up to date."));
    }

    #[test]
    fn test_update_all_malformed_json_mutates_nothing() {
        let runner = MockRunner::new().respond(
            "python3 -m pip list --outdated --format=json",
            CommandResult::ok("not json"),
        );
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        update_all(&mut session, &pip()).unwrap();

        assert!(out.contents().contains("❌  unexpected output from pip"));
        assert!(runner.calls_starting_with("python3 -m pip install").is_empty());
    }

    #[test]
    fn test_requirements_file_is_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("requirements.txt");
        let runner = MockRunner::new()
            .respond(
                "python3 -m pip freeze",
                CommandResult::ok("requests==2.31.0\nrich==13.7.0"),
            )
            .respond("python3 -m pip freeze", CommandResult::ok("rich==13.9.4"));
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        update_requirements(&mut session, &pip(), &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "requests==2.31.0\nrich==13.7.0\n"
        );

        update_requirements(&mut session, &pip(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "rich==13.9.4\n");
        assert!(out.contents().contains("requirements.txt updated."));
    }

    #[test]
    fn test_empty_freeze_writes_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("requirements.txt");
        fs::write(&path, "stale==0.1\n").unwrap();
        let runner = MockRunner::new().respond("python3 -m pip freeze", CommandResult::ok(""));
        let (console, _out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        update_requirements(&mut session, &pip(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_failed_freeze_leaves_file_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("requirements.txt");
        fs::write(&path, "keep==1.0\n").unwrap();
        let runner = MockRunner::new().respond(
            "python3 -m pip freeze",
            CommandResult::failed("No module named pip"),
        );
        let (console, out) = scripted_console("");
        let mut session = Session::new(console, &runner);

        update_requirements(&mut session, &pip(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "keep==1.0\n");
        assert!(out.contents().contains("No module named pip"));
    }

    #[test]
    fn test_missing_python_is_fatal() {
        let runner = MockRunner::new().missing("python3.99");
        let (console, _out) = scripted_console("1\n0\n");
        let mut session = Session::new(console, &runner);
        let config = PipConfig {
            python: "python3.99".to_string(),
            ..PipConfig::default()
        };

        let err = run_pip_manager(&mut session, &config).unwrap_err();
        assert!(err.to_string().contains("'python3.99' command not found"));
    }
}
