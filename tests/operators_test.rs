//! Integration tests for the printer setup operators

mod common;

use bambu3mf::fit::{self, MeshObject};
use bambu3mf::nalgebra::{Point3, Vector3};
use bambu3mf::operators::{
    self, BUILD_PLATE_MATERIAL, BUILD_PLATE_NAME, BUILD_VOLUME_COLOR, BUILD_VOLUME_NAME,
};
use bambu3mf::scene::DisplayType;
use bambu3mf::{
    LengthUnit, ObjectKind, OperatorStatus, PresetTable, PrinterModel, ReportLevel, Scene,
    SceneObject, SetupConfig, UnitSystem,
};
use common::{assert_close, box_object};

fn presets() -> PresetTable {
    PresetTable::bambu_lab()
}

#[test]
fn test_setup_scene_units_and_clipping() {
    let mut scene = Scene::new();
    let outcome = operators::setup_scene(&mut scene, &SetupConfig::new());

    assert_eq!(outcome.status, OperatorStatus::Finished);
    assert_eq!(scene.unit_settings.system, UnitSystem::Metric);
    assert_eq!(scene.unit_settings.scale_length, 0.001);
    assert_eq!(scene.unit_settings.length_unit, LengthUnit::Millimeters);
    for view in &scene.views {
        assert_eq!(view.clip_start, 0.1);
        assert_eq!(view.clip_end, 10000.0);
    }
    assert_eq!(
        outcome.messages().collect::<Vec<_>>(),
        vec!["Scene configured for millimeter workflow"]
    );
}

#[test]
fn test_build_volume_geometry_and_display() {
    let mut scene = Scene::new().with_printer(PrinterModel::A1Mini);
    let outcome = operators::create_build_volume(&mut scene, &presets());
    assert_eq!(
        outcome.messages().next(),
        Some("Created 180×180×180mm build volume")
    );

    let volume = scene.require(BUILD_VOLUME_NAME).unwrap();
    let aabb = fit::compute_object_aabb(volume);
    assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(aabb.max, Point3::new(180.0, 180.0, 180.0));
    assert_eq!(volume.location, Vector3::new(90.0, 90.0, 90.0));
    assert_eq!(volume.scale, Vector3::new(1.0, 1.0, 1.0));

    assert_eq!(volume.display.display_type, DisplayType::Wire);
    assert!(volume.display.show_in_front);
    assert!(volume.display.hide_select);
    assert!(volume.display.hide_render);
    assert_eq!(volume.display.color, BUILD_VOLUME_COLOR);
    assert!(volume.locks.is_fully_locked());
    assert!(!volume.selected);
    assert_eq!(scene.cursor, Point3::origin());
}

#[test]
fn test_build_volume_is_replaced() {
    let mut scene = Scene::new().with_printer(PrinterModel::A1Mini);
    operators::create_build_volume(&mut scene, &presets());
    scene.props.printer_model = PrinterModel::X1E;
    operators::create_build_volume(&mut scene, &presets());

    let volumes: Vec<_> = scene
        .objects()
        .iter()
        .filter(|o| o.name == BUILD_VOLUME_NAME)
        .collect();
    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0].dimensions(), Vector3::new(256.0, 256.0, 256.0));
}

#[test]
fn test_build_plate() {
    let mut scene = Scene::new().with_printer(PrinterModel::P1S);
    let outcome = operators::create_build_plate(&mut scene, &presets());
    assert_eq!(outcome.messages().next(), Some("Created 256×256mm build plate"));

    let plate = scene.find(BUILD_PLATE_NAME).expect("build plate created");
    let aabb = fit::compute_object_aabb(plate);
    assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(aabb.max, Point3::new(256.0, 256.0, 0.0));
    assert_eq!(plate.materials, vec![BUILD_PLATE_MATERIAL.to_string()]);
    assert!(plate.display.hide_select);
    assert!(plate.locks.is_fully_locked());
    assert!(!plate.selected);

    let material = scene.material(BUILD_PLATE_MATERIAL).expect("material created");
    assert_eq!(material.base_color, [0.15, 0.15, 0.15, 1.0]);
    assert_eq!(material.roughness, 0.8);

    // Recreating reuses the material
    operators::create_build_plate(&mut scene, &presets());
    assert_eq!(scene.materials.len(), 1);
    assert_eq!(
        scene.objects().iter().filter(|o| o.name == BUILD_PLATE_NAME).count(),
        1
    );
}

#[test]
fn test_full_setup() {
    let mut scene = Scene::new();
    let config = SetupConfig::new().with_printer(PrinterModel::A1);
    let outcome = operators::full_setup(&mut scene, &config, &presets());

    assert!(outcome.is_finished());
    assert_eq!(scene.props.printer_model, PrinterModel::A1);
    assert!(scene.find(BUILD_VOLUME_NAME).is_some());
    assert!(scene.find(BUILD_PLATE_NAME).is_some());
    assert_eq!(
        outcome.messages().last(),
        Some("Full printer setup complete!")
    );
    assert_eq!(outcome.reports.len(), 4);

    let framed = scene.views[0].framed.expect("view framed");
    assert_eq!(framed.max, Point3::new(256.0, 256.0, 256.0));
    assert!(scene.selected_objects().is_empty());
}

#[test]
fn test_check_fit_nothing_selected() {
    let mut scene = Scene::new();
    scene.add_object(box_object("part", (10.0, 10.0, 10.0), (0.0, 0.0, 0.0)));
    scene.deselect_all();

    let outcome = operators::check_model_fit(&scene, &presets());
    assert_eq!(outcome.status, OperatorStatus::Cancelled);
    assert_eq!(outcome.reports[0].level, ReportLevel::Warning);
    assert_eq!(outcome.reports[0].message, "No objects selected");
}

#[test]
fn test_check_fit_fits() {
    let mut scene = Scene::new();
    scene.add_object(box_object("part", (10.0, 20.0, 30.0), (5.0, 5.0, 0.0)));

    let outcome = operators::check_model_fit(&scene, &presets());
    let report = outcome.value.expect("fit report");
    assert!(report.fits);
    assert_eq!(outcome.reports[0].level, ReportLevel::Info);
    assert_eq!(outcome.reports[0].message, "Model fits! Size: 10.0x20.0x30.0mm");
}

#[test]
fn test_check_fit_combines_selection() {
    let mut scene = Scene::new();
    let a = scene.add_object(box_object("a", (100.0, 10.0, 10.0), (0.0, 0.0, 0.0)));
    let b = scene.add_object(box_object("b", (100.0, 10.0, 10.0), (100.0, 0.0, 0.0)));
    scene.select_only(&[a, b]);

    let outcome = operators::check_model_fit(&scene, &presets());
    let report = outcome.value.expect("fit report");
    assert!(!report.fits);
    assert_eq!(report.size, Vector3::new(200.0, 10.0, 10.0));
    assert_eq!(outcome.reports[0].level, ReportLevel::Warning);
    assert_eq!(
        outcome.reports[0].message,
        "Model too large! Size: 200.0x10.0x10.0mm (max: 180x180x180mm)"
    );
}

#[test]
fn test_check_fit_does_not_modify_scene() {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("empty", ObjectKind::Empty));
    let before = scene.clone();

    let outcome = operators::check_model_fit(&scene, &presets());
    assert_eq!(outcome.status, OperatorStatus::Cancelled);
    assert_eq!(scene, before);
}

#[test]
fn test_center_each_object_independently() {
    let mut scene = Scene::new().with_printer(PrinterModel::A1Mini);
    let a = scene.add_object(box_object("a", (20.0, 20.0, 20.0), (-50.0, -50.0, 10.0)));
    let b = scene.add_object(box_object("b", (40.0, 10.0, 5.0), (300.0, 12.0, -3.0)));
    scene.select_only(&[a, b]);

    let outcome = operators::center_on_plate(&mut scene, &presets());
    assert!(outcome.is_finished());
    assert_eq!(
        outcome.messages().collect::<Vec<_>>(),
        vec!["Objects centered on build plate"]
    );
    let moved = outcome.value.expect("offsets");
    assert_eq!(moved.len(), 2);
    assert_eq!(moved[0].0, "a");

    for index in [a, b] {
        let object = scene.object(index).unwrap();
        let aabb = fit::compute_object_aabb(object);
        assert_close(aabb.center().x, 90.0, "center x");
        assert_close(aabb.center().y, 90.0, "center y");
        assert_close(aabb.min.z, 0.0, "min z");
    }
}

#[test]
fn test_center_nothing_selected() {
    let mut scene = Scene::new();
    scene.add_object(box_object("a", (1.0, 1.0, 1.0), (5.0, 5.0, 5.0)));
    scene.deselect_all();
    let before = scene.clone();

    let outcome = operators::center_on_plate(&mut scene, &presets());
    assert_eq!(outcome.status, OperatorStatus::Cancelled);
    assert_eq!(outcome.messages().next(), Some("No objects selected"));
    assert_eq!(scene, before);
}

#[test]
fn test_markers_are_not_selectable() {
    let mut scene = Scene::new();
    operators::full_setup(&mut scene, &SetupConfig::new(), &presets());
    let part = scene.add_object(box_object("part", (10.0, 10.0, 10.0), (0.0, 0.0, 0.0)));

    let all: Vec<usize> = (0..scene.objects().len()).collect();
    scene.select_only(&all);
    assert_eq!(scene.selected_indices(), vec![part]);

    // The markers stay put when the selection is centered
    operators::center_on_plate(&mut scene, &presets());
    let volume = scene.find(BUILD_VOLUME_NAME).unwrap();
    assert_eq!(volume.location, Vector3::new(90.0, 90.0, 90.0));
    assert!(scene.find("part").unwrap().is_mesh());
}
