use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, bail};
use modules_dom::{ShimRuntime, Surface};
use shim_core::{FixtureBridge, HostFixture};

use crate::args::{Args, CommandSpec};

pub const COMMAND: CommandSpec = CommandSpec {
    name: "run",
    usage: "run <script.js>",
    summary: "run a script against a fixture host",
    handler: cmd,
};

const HOST_ENV: &str = "DOMSHIM_HOST";

pub fn cmd(args: &Args) -> anyhow::Result<()> {
    let script = super::first_positional(args, "script path (domshim run <script.js>)")?;
    let surface = resolve_surface(args.param("--surface"))?;
    let fixture = match host_path(args.param("--host"), std::env::var(HOST_ENV).ok()) {
        Some(path) => HostFixture::load(&path)?,
        None => {
            tracing::debug!("no host fixture given, every query will come back empty");
            HostFixture::default()
        }
    };

    let bridge = run_script(Path::new(script), fixture, surface)?;
    tracing::debug!("[run] {} host call(s)", bridge.calls().len());
    Ok(())
}

pub fn run_script(
    script: &Path,
    fixture: HostFixture,
    surface: Surface,
) -> anyhow::Result<Rc<FixtureBridge>> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;

    let bridge = Rc::new(FixtureBridge::new(fixture));
    let mut runtime = ShimRuntime::new(bridge.clone(), surface)?;
    runtime.execute(&script.display().to_string(), source)?;
    Ok(bridge)
}

fn resolve_surface(value: Option<&str>) -> anyhow::Result<Surface> {
    match value {
        None => Ok(Surface::default()),
        Some(text) => match Surface::parse(text) {
            Some(surface) => Ok(surface),
            None => bail!("unknown surface '{}' (expected full or query-only)", text),
        },
    }
}

fn host_path(flag: Option<&str>, env: Option<String>) -> Option<PathBuf> {
    flag.map(PathBuf::from)
        .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn surface_defaults_to_full() {
        assert_eq!(resolve_surface(None).unwrap(), Surface::Full);
        assert_eq!(
            resolve_surface(Some("query-only")).unwrap(),
            Surface::QueryOnly
        );
        assert!(resolve_surface(Some("partial")).is_err());
    }

    #[test]
    fn host_flag_beats_env() {
        assert_eq!(
            host_path(Some("a.json"), Some("b.json".to_string())),
            Some(PathBuf::from("a.json"))
        );
        assert_eq!(
            host_path(None, Some("b.json".to_string())),
            Some(PathBuf::from("b.json"))
        );
        assert_eq!(host_path(None, Some(String::new())), None);
        assert_eq!(host_path(None, None), None);
    }

    #[test]
    fn runs_script_file_against_fixture() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("page.js");
        fs::write(
            &script,
            r#"
            for (const node of document.querySelectorAll("p")) {
              console.log(node.getAttribute("id"));
            }
            "#,
        )
        .expect("write script");

        let fixture = HostFixture::default()
            .with_selector("p", [json!(1), json!(2)])
            .with_attribute(json!(1), "id", "intro")
            .with_attribute(json!(2), "id", "outro");

        let bridge = run_script(&script, fixture, Surface::Full).expect("run script");
        assert_eq!(bridge.logs(), vec![json!("intro"), json!("outro")]);
    }

    #[test]
    fn missing_script_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = run_script(
            &dir.path().join("nope.js"),
            HostFixture::default(),
            Surface::Full,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("nope.js"));
    }
}
