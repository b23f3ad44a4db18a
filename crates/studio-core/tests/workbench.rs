use std::collections::HashMap;
use std::path::PathBuf;

use studio_core::{
    ChangeTracker, CloseOutcome, Config, ElementEntry, MenuCommand, Router, Tab, TabStore,
    Workbench,
};

fn catalog() -> HashMap<String, ElementEntry> {
    let mut map = HashMap::new();
    map.insert(
        "src/features/home/App.js".to_string(),
        ElementEntry::new("App")
            .with_feature("home")
            .with_test("tests/features/home/App.test.js")
            .with_style("src/features/home/App.less"),
    );
    map.insert("src/index.js".to_string(), ElementEntry::new("index"));
    map.insert("README.md".to_string(), ElementEntry::new("README"));
    map.insert("images/logo.png".to_string(), ElementEntry::new("logo"));
    map
}

fn temp_config(name: &str) -> Config {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("studio-it-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    Config {
        project_root: "/proj/".to_string(),
        persist_tabs: true,
        ..Config::new(dir)
    }
}

#[test]
fn test_edit_and_close_session() {
    let workbench = Workbench::in_memory("/proj/");
    workbench.set_catalog(catalog());

    let app = workbench
        .open_element("src/features/home/App.js", "code")
        .unwrap();
    let index = workbench.open_element("src/index.js", "code").unwrap();
    workbench.open_element("README.md", "code").unwrap();
    workbench.open(Tab::coverage()).unwrap();

    let buffers = workbench.buffers();
    buffers.open("src/features/home/App.js", "export default App;");
    buffers.open("src/features/home/App.less", ".app {}");
    buffers
        .edit("src/features/home/App.less", ".app { color: red; }")
        .unwrap();

    let tabs = workbench.tabs();
    assert!(tabs.is_changed(&app));
    assert!(!tabs.is_changed(&index));
    assert!(tabs.is_active(&Tab::coverage()));

    // Closing everything right of App: index and README close at once,
    // the coverage tab was active so focus returns through the history
    let outcomes = tabs.handle_menu_click(&app, MenuCommand::CloseRight);
    assert_eq!(outcomes, vec![CloseOutcome::Closed; 3]);
    assert_eq!(
        workbench
            .store()
            .home()
            .open_tabs
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>(),
        vec!["src/features/home/App.js"]
    );
    assert!(tabs.is_active(&app));

    let meta = tabs.current_element().unwrap();
    assert!(meta.flags.has_test);

    // The last tab is dirty: nothing happens until the prompt is answered
    let CloseOutcome::AwaitingConfirmation(id) = tabs.handle_close(&app) else {
        panic!("Expected confirmation for dirty tab");
    };
    let prompt = tabs.pending_prompt().unwrap();
    assert_eq!(
        prompt.prompt.content,
        "Do you want to discard changes you made to src/features/home/App.js?"
    );
    assert!(tabs.is_active(&app));

    tabs.confirm(id).unwrap();
    assert!(workbench.store().home().open_tabs.is_empty());
    assert_eq!(workbench.router().location().pathname(), "/welcome");
    assert!(!buffers.contains("src/features/home/App.less"));
    assert!(!buffers.is_changed("src/features/home/App.less"));
}

#[test]
fn test_tab_strip_survives_restart() {
    let config = temp_config("restart");

    {
        let workbench = Workbench::new(config.clone()).unwrap();
        workbench.initialize().unwrap();
        workbench.open_element("src/index.js", "code").unwrap();
        workbench.open(Tab::build()).unwrap();
        workbench.open_element("README.md", "code").unwrap();
        workbench.tabs().handle_close(&Tab::build());
    }

    let workbench = Workbench::new(config.clone()).unwrap();
    workbench.initialize().unwrap();

    let home = workbench.store().home();
    assert_eq!(
        home.open_tabs.iter().map(|t| t.key.as_str()).collect::<Vec<_>>(),
        vec!["src/index.js", "README.md"]
    );
    assert_eq!(home.history_tabs, vec!["README.md", "src/index.js"]);
    assert_eq!(
        workbench.router().location().active_element(),
        Some("README.md")
    );

    let _ = std::fs::remove_dir_all(config.database_path.parent().unwrap());
}

#[test]
fn test_tooltips_and_views() {
    let workbench = Workbench::in_memory("/proj/");
    workbench.open_element("src/index.js", "code").unwrap();
    workbench.open(Tab::tests("/tools/tests")).unwrap();

    let views = workbench.tabs().tab_views();
    assert_eq!(views[0].tooltip, "src/index.js");
    assert_eq!(views[1].tooltip, "Run Tests");
    assert!(!views[0].active);
    assert!(views[1].active);
}

#[test]
fn test_tab_clicks_drive_close_focus() {
    let config = temp_config("clicks");

    {
        let workbench = Workbench::new(config.clone()).unwrap();
        workbench.open_element("src/index.js", "code").unwrap();
        workbench.open_element("README.md", "code").unwrap();
        workbench.open(Tab::build()).unwrap();

        let tabs = workbench.tabs();
        tabs.open_tab("src/index.js").unwrap();
        tabs.open_tab("README.md").unwrap();

        tabs.handle_close(&Tab::element("README.md", "code"));
        assert_eq!(
            workbench.router().location().active_element(),
            Some("src/index.js")
        );
    }

    let workbench = Workbench::new(config.clone()).unwrap();
    workbench.initialize().unwrap();
    assert_eq!(
        workbench.store().home().history_tabs,
        vec!["src/index.js", "#build"]
    );
    assert_eq!(
        workbench.router().location().active_element(),
        Some("src/index.js")
    );

    let _ = std::fs::remove_dir_all(config.database_path.parent().unwrap());
}
