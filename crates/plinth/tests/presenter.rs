//! End-to-end presenter wiring: configuration, controller, switch and label.

use std::io::Write;
use std::sync::Arc;

use plinth::config::PresenterConfig;
use plinth::controller::{ControllerError, OutlettedController};
use plinth::list::{DatasetSource, ListAdapter, Surface};
use plinth::model::{Dataset, Section, SectionedDataset};
use plinth::widget::{AsDisplay, DualSurfaceDisplay, ForegroundMode, FormattedLabel};
use plinth_core::{SharedViewRegistry, View};

type Library = ListAdapter<DatasetSource<SectionedDataset<String>>>;

fn library(data: &Arc<SectionedDataset<String>>) -> Arc<Library> {
    Arc::new(ListAdapter::new(
        DatasetSource::new(data.clone(), "cover", "title").with_text(|s: &String| s.clone()),
    ))
}

#[test]
fn test_configured_presenter() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "breakpoint = 800.0").unwrap();
    writeln!(file, "[policy]").unwrap();
    writeln!(file, "compact = \"row\"").unwrap();
    writeln!(file, "regular = \"grid\"").unwrap();
    let config = PresenterConfig::from_path(file.path()).unwrap();

    let registry = SharedViewRegistry::new();
    let grid = Surface::grid(&registry);
    let rows = Surface::rows(&registry);
    grid.register_cell("cover");
    rows.register_cell("title");

    let data = Arc::new(SectionedDataset::new(vec![Section::titled(
        "Shelf",
        vec!["Kindred".to_string(), "Beloved".to_string()],
    )]));
    let model = library(&data);

    let display = DualSurfaceDisplay::builder(&registry)
        .grid(grid.view_id())
        .row(rows.view_id())
        .config(&config)
        .build()
        .unwrap();
    let mut controller = OutlettedController::builder()
        .model(&model)
        .display(display)
        .title("Library")
        .build();
    controller.load().unwrap();

    let display = controller.display_mut().unwrap();
    assert_eq!(display.as_display().title().as_deref(), Some("Library"));

    // 700 points is compact under an 800 point breakpoint.
    assert!(display.resized(700.0));
    assert_eq!(display.foreground_mode(), ForegroundMode::Row);

    let shown = rows.load(model.as_ref());
    assert_eq!(shown.headers, vec![Some("Shelf".to_string())]);
    assert_eq!(shown.sections[0][0].text.as_deref(), Some("Kindred"));

    // The header label counts items through its template.
    let mut header = FormattedLabel::new(&registry).with_text("%d books");
    header.attach(display.view_id()).unwrap();
    data.push_item(0, "Jazz".to_string());
    header.set_text(Some(data.item_count(0).to_string()));
    assert_eq!(header.text().as_deref(), Some("3 books"));
    assert_eq!(rows.load(model.as_ref()).cell_count(), 3);
}

#[test]
fn test_presenter_refuses_to_load_without_model() {
    let registry = SharedViewRegistry::new();
    let data = Arc::new(SectionedDataset::single_section(vec!["x".to_string()]));
    let model = library(&data);
    let display = DualSurfaceDisplay::builder(&registry).build().unwrap();

    let mut controller: OutlettedController<Library, DualSurfaceDisplay> =
        OutlettedController::builder().model(&model).display(display).build();
    drop(model);

    assert_eq!(controller.load(), Err(ControllerError::MissingModel));
    assert!(!controller.is_loaded());
    assert_eq!(controller.display().unwrap().as_display().title(), None);
}
