use super::*;
use crate::config::Config;
use crate::editor::Editor;
use crate::feature::{ActiveState, CoordPath, Geometry, Meta, Position, create_vertex};
use crate::input::{Key, MapEvent};
use crate::map::{DrawEvent, HeadlessMap, MapSurface, ScreenPoint};
use crate::modes::{ActiveMode, ModeOptions};
use crate::ui::{Button, Cursor};

const P0: Position = Position { lng: 0.0, lat: 0.0 };
const P1: Position = Position { lng: 1.0, lat: 0.0 };
const P2: Position = Position { lng: 1.0, lat: 1.0 };
const P3: Position = Position { lng: 0.0, lat: 1.0 };

fn drawing_editor(config: &Config) -> Editor {
    let map = HeadlessMap::new(config.map.pixels_per_degree, config.map.double_click_zoom);
    drawing_editor_on(config, map)
}

fn drawing_editor_on(config: &Config, map: HeadlessMap) -> Editor {
    let mut editor = Editor::new(config, Box::new(map)).record_events();
    editor.change_mode(ModeName::DrawPolygon, ModeOptions::default());
    editor.take_events();
    editor
}

fn polygon_mode(editor: &Editor) -> &DrawPolygonMode {
    match editor.mode() {
        ActiveMode::DrawPolygon(mode) => mode,
        _ => panic!("expected polygon mode, got {:?}", editor.mode_name()),
    }
}

fn outer_ring(editor: &Editor, id: FeatureId) -> Vec<Position> {
    editor
        .context()
        .store
        .get(id)
        .map(|polygon| polygon.coordinates()[0].clone())
        .unwrap_or_default()
}

fn move_and_click(editor: &mut Editor, at: Position) {
    editor.handle_event(MapEvent::mouse_move(at));
    editor.handle_event(MapEvent::click(at));
}

fn created(events: &[DrawEvent]) -> Vec<Feature> {
    events
        .iter()
        .filter_map(|event| match event {
            DrawEvent::Create { features } => Some(features.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

fn has_mode_change(events: &[DrawEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, DrawEvent::ModeChange { mode: ModeName::SimpleSelect }))
}

#[test]
fn enter_commits_every_clicked_vertex() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2, P3] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::mouse_move(Position::new(0.5, 2.0)));
    editor.handle_event(MapEvent::key_up(Key::Return));

    let events = editor.take_events();
    let features = created(&events);
    assert_eq!(features.len(), 1);
    assert_eq!(
        features[0].geometry,
        Geometry::Polygon(vec![vec![P0, P1, P2, P3, P0]])
    );
    assert_eq!(features[0].properties.id.as_deref(), Some(id.to_string().as_str()));
    assert!(has_mode_change(&events));
    assert_eq!(editor.mode_name(), ModeName::SimpleSelect);
    assert_eq!(editor.context().store.selected_ids(), &[id]);
}

#[test]
fn click_near_first_vertex_closes_ring() {
    let mut editor = drawing_editor(&Config::default());

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    // One pixel away from the first vertex at the default scale.
    move_and_click(&mut editor, Position::new(0.01, 0.0));

    let features = created(&editor.take_events());
    assert_eq!(features.len(), 1);
    assert_eq!(
        features[0].geometry,
        Geometry::Polygon(vec![vec![P0, P1, P2, P0]])
    );
}

#[test]
fn click_outside_tolerance_adds_vertex() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    move_and_click(&mut editor, Position::new(0.1, 0.0));

    assert_eq!(editor.mode_name(), ModeName::DrawPolygon);
    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 4);
    assert_eq!(outer_ring(&editor, id).len(), 4);
    assert!(created(&editor.take_events()).is_empty());
}

#[test]
fn second_click_on_last_vertex_finishes() {
    let mut editor = drawing_editor(&Config::default());

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::click(P2));

    let features = created(&editor.take_events());
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].outer_len(), 4);
}

#[test]
fn tap_uses_touch_tolerance() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        editor.handle_event(MapEvent::tap(p));
    }
    assert_eq!(outer_ring(&editor, id), vec![P0, P1, P2]);

    // 20 px from the first vertex: outside click tolerance, inside touch tolerance.
    editor.handle_event(MapEvent::tap(Position::new(0.2, 0.0)));

    let features = created(&editor.take_events());
    assert_eq!(
        features[0].geometry,
        Geometry::Polygon(vec![vec![P0, P1, P2, P0]])
    );
}

#[test]
fn click_on_vertex_handle_finishes() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    let far = Position::new(5.0, 5.0);
    let handle = create_vertex(id, P2, CoordPath::outer(2), false);
    editor.handle_event(MapEvent::mouse_move(far));
    editor.handle_event(MapEvent::click(far).over(handle));

    let features = created(&editor.take_events());
    assert_eq!(
        features[0].geometry,
        Geometry::Polygon(vec![vec![P0, P1, P2, P0]])
    );
}

#[test]
fn escape_discards_silently() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::key_up(Key::Escape));

    let events = editor.take_events();
    assert!(created(&events).is_empty());
    assert!(!events.iter().any(|e| matches!(e, DrawEvent::Delete { .. })));
    assert!(has_mode_change(&events));
    assert!(!editor.context().store.contains(id));
    assert_eq!(editor.mode_name(), ModeName::SimpleSelect);
}

#[test]
fn finishing_degenerate_polygon_discards_it() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    move_and_click(&mut editor, P0);
    move_and_click(&mut editor, P1);
    editor.handle_event(MapEvent::key_up(Key::Return));

    let events = editor.take_events();
    assert!(created(&events).is_empty());
    assert!(!events.iter().any(|e| matches!(e, DrawEvent::Delete { .. })));
    assert!(editor.context().store.is_empty());
    assert!(!editor.context().store.is_selected(id));
    assert_eq!(editor.mode_name(), ModeName::SimpleSelect);
}

#[test]
fn repeated_vertices_do_not_make_a_polygon() {
    let mut editor = drawing_editor(&Config::default());

    move_and_click(&mut editor, P0);
    move_and_click(&mut editor, P1);
    // Back on the first vertex, but reported far away on screen so it does not close.
    editor.handle_event(MapEvent::click(P0).at_point(ScreenPoint::new(10_000.0, 10_000.0)));
    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 3);
    editor.handle_event(MapEvent::key_up(Key::Return));

    assert!(created(&editor.take_events()).is_empty());
    assert!(editor.context().store.is_empty());
}

#[test]
fn trash_with_one_vertex_abandons_drawing() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    move_and_click(&mut editor, P0);
    editor.trash();

    let events = editor.take_events();
    assert!(!events.iter().any(|e| matches!(e, DrawEvent::Delete { .. })));
    assert!(has_mode_change(&events));
    assert!(!editor.context().store.contains(id));
    assert_eq!(editor.mode_name(), ModeName::SimpleSelect);
}

#[test]
fn trash_undoes_last_vertex() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::mouse_move(P3));
    editor.trash();

    assert_eq!(editor.mode_name(), ModeName::DrawPolygon);
    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 2);
    assert_eq!(outer_ring(&editor, id), vec![P0, P1, P3]);
}

#[test]
fn trash_right_after_click_keeps_pointer_slot() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.trash();

    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 2);
    // The undone vertex now floats under the pointer.
    assert_eq!(outer_ring(&editor, id), vec![P0, P1, P2]);

    editor.handle_event(MapEvent::mouse_move(P3));
    assert_eq!(outer_ring(&editor, id), vec![P0, P1, P3]);
}

#[test]
fn trash_after_taps_removes_last_tap() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        editor.handle_event(MapEvent::tap(p));
    }
    editor.trash();

    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 2);
    assert_eq!(outer_ring(&editor, id), vec![P0, P1]);
}

#[test]
fn render_grows_from_nothing_to_line_to_polygon() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    assert!(editor.render_frame().is_empty());

    editor.handle_event(MapEvent::mouse_move(P0));
    assert!(editor.render_frame().is_empty());

    editor.handle_event(MapEvent::click(P0));
    editor.handle_event(MapEvent::mouse_move(P1));
    let frame = editor.render_frame();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].geometry, Geometry::LineString(vec![P0, P1]));
    assert_eq!(frame[0].properties.active, Some(ActiveState::Active));

    editor.handle_event(MapEvent::click(P1));
    editor.handle_event(MapEvent::mouse_move(P2));
    let frame = editor.render_frame();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].geometry, Geometry::LineString(vec![P0, P1]));

    editor.handle_event(MapEvent::click(P2));
    editor.handle_event(MapEvent::mouse_move(P3));
    let frame = editor.render_frame();
    assert_eq!(frame.len(), 3);

    let markers: Vec<_> = frame
        .iter()
        .filter(|f| f.properties.meta == Some(Meta::Vertex))
        .collect();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].geometry, Geometry::Point(P0));
    assert_eq!(markers[0].properties.coord_path.as_deref(), Some("0.0"));
    assert_eq!(markers[1].geometry, Geometry::Point(P2));
    assert_eq!(markers[1].properties.coord_path.as_deref(), Some("0.2"));
    assert_eq!(markers[1].properties.parent.as_deref(), Some(id.to_string().as_str()));

    let polygon = frame
        .iter()
        .find(|f| f.properties.meta == Some(Meta::Feature))
        .expect("polygon in frame");
    assert_eq!(
        polygon.geometry,
        Geometry::Polygon(vec![vec![P0, P1, P2, P3, P0]])
    );
}

#[test]
fn other_features_render_inactive() {
    let mut editor = drawing_editor(&Config::default());
    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::key_up(Key::Return));
    editor.change_mode(ModeName::DrawPolygon, ModeOptions::default());

    let frame = editor.render_frame();
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].properties.active, Some(ActiveState::Inactive));
    assert!(matches!(frame[0].geometry, Geometry::Polygon(_)));
}

#[test]
fn stop_after_escape_is_a_no_op() {
    let config = Config::default();
    let mut ctx = DrawContext::new(&config, Box::new(HeadlessMap::default()));
    ctx.record_fired();
    let mut mode = DrawPolygonMode::new(&mut ctx);
    mode.start(&mut ctx);

    for p in [P0, P1, P2] {
        mode.handle_event(&MapEvent::click(p), &mut ctx);
    }
    let change = mode.handle_event(&MapEvent::key_up(Key::Escape), &mut ctx);
    assert_eq!(change, Some(ModeChange::to(ModeName::SimpleSelect)));
    ctx.take_fired();

    assert_eq!(mode.stop(&mut ctx), None);
    assert_eq!(mode.stop(&mut ctx), None);
    ctx.flush_store();
    assert!(ctx.take_fired().is_empty());
    assert!(ctx.store.is_empty());
}

#[test]
fn externally_deleted_polygon_is_not_committed() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    editor.delete(&[id]);
    editor.handle_event(MapEvent::key_up(Key::Return));

    let events = editor.take_events();
    assert!(matches!(events.first(), Some(DrawEvent::Delete { .. })));
    assert!(created(&events).is_empty());
    assert_eq!(editor.mode_name(), ModeName::SimpleSelect);
}

#[test]
fn start_and_stop_toggle_map_state() {
    let mut editor = drawing_editor(&Config::default());
    assert!(!editor.context().map.double_click_zoom_enabled());
    assert_eq!(editor.context().ui.cursor(), Cursor::Add);
    assert_eq!(editor.context().ui.active_button(), Some(Button::Polygon));
    assert!(editor.context().actions().trash);

    editor.handle_event(MapEvent::key_up(Key::Escape));
    assert!(editor.context().map.double_click_zoom_enabled());
    assert_eq!(editor.context().ui.cursor(), Cursor::None);
    assert_eq!(editor.context().ui.active_button(), None);
}

#[test]
fn double_click_zoom_stays_off_if_initially_off() {
    let mut config = Config::default();
    config.map.double_click_zoom = false;
    let mut editor = drawing_editor(&config);

    editor.handle_event(MapEvent::key_up(Key::Escape));
    assert!(!editor.context().map.double_click_zoom_enabled());
}

#[test]
fn pointer_cursor_over_vertex_handle() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();
    move_and_click(&mut editor, P0);

    let handle = create_vertex(id, P0, CoordPath::outer(0), false);
    editor.handle_event(MapEvent::mouse_move(P0).over(handle));
    assert_eq!(editor.context().ui.cursor(), Cursor::Pointer);

    editor.handle_event(MapEvent::click(P1));
    assert_eq!(editor.context().ui.cursor(), Cursor::Add);
}

#[test]
fn entering_mode_announces_trash() {
    let mut editor = Editor::new(&Config::default(), Box::new(HeadlessMap::default())).record_events();
    editor.take_events();
    editor.change_mode(ModeName::DrawPolygon, ModeOptions::default());

    let events = editor.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        DrawEvent::Actionable { actions } if actions.trash && !actions.combine_features
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, DrawEvent::ModeChange { mode: ModeName::DrawPolygon })));
}

fn snapping_config() -> Config {
    let mut config = Config::default();
    config.draw.snap_to = true;
    config.draw.snap_over_sources = vec!["roads".into()];
    config.draw.snap_over_styles = vec!["snap-hover".into()];
    config
}

fn map_with_road(config: &Config, at: Position) -> HeadlessMap {
    let mut map = HeadlessMap::new(config.map.pixels_per_degree, true);
    map.add_layer("snap-hover");
    map.add_source_feature(
        "roads",
        Feature {
            id: Some("road-1".into()),
            properties: Default::default(),
            geometry: Geometry::Point(at),
        },
    );
    map
}

#[test]
fn clicks_commit_snapped_position() {
    let config = snapping_config();
    let road = Position::new(0.5, 0.5);
    let mut editor = drawing_editor_on(&config, map_with_road(&config, road));
    let id = polygon_mode(&editor).polygon_id();

    let near = Position::new(0.52, 0.5);
    editor.handle_event(MapEvent::mouse_move(near));
    assert_eq!(outer_ring(&editor, id), vec![road]);

    editor.handle_event(MapEvent::click(Position::new(0.53, 0.5)));
    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 1);
    assert_eq!(outer_ring(&editor, id), vec![road]);
}

#[test]
fn snapping_ignores_far_targets() {
    let config = snapping_config();
    let mut editor = drawing_editor_on(&config, map_with_road(&config, Position::new(5.0, 5.0)));
    let id = polygon_mode(&editor).polygon_id();

    move_and_click(&mut editor, P0);
    assert_eq!(outer_ring(&editor, id), vec![P0]);
}

#[test]
fn live_source_changes_are_adopted() {
    let config = snapping_config();
    let mut editor = drawing_editor_on(&config, map_with_road(&config, P3));

    editor.context_mut().options.snap_over_sources = vec!["roads".into(), "rivers".into()];
    editor.handle_event(MapEvent::mouse_move(P0));

    let sources = polygon_mode(&editor).state().snap_over_sources().to_vec();
    assert_eq!(sources, vec!["roads".to_string(), "rivers".to_string()]);
}

#[test]
fn finishing_removes_snap_preview_layers() {
    let config = snapping_config();
    let mut editor = drawing_editor_on(&config, map_with_road(&config, Position::new(9.0, 9.0)));

    for p in [P0, P1, P2] {
        move_and_click(&mut editor, p);
    }
    assert!(editor.context().map.has_layer("snap-hover"));
    editor.handle_event(MapEvent::key_up(Key::Return));

    assert!(!editor.context().map.has_layer("snap-hover"));
    assert_eq!(created(&editor.take_events()).len(), 1);
}

#[test]
fn turning_snapping_off_uses_raw_clicks_again() {
    let config = snapping_config();
    let road = Position::new(5.0, 5.0);
    let mut editor = drawing_editor_on(&config, map_with_road(&config, road));
    let id = polygon_mode(&editor).polygon_id();

    editor.handle_event(MapEvent::mouse_move(Position::new(5.01, 5.0)));
    assert_eq!(outer_ring(&editor, id), vec![road]);

    editor.context_mut().options.snap_to = false;
    editor.handle_event(MapEvent::click(P1));
    assert_eq!(outer_ring(&editor, id), vec![P1]);

    editor.handle_event(MapEvent::mouse_move(P2));
    editor.handle_event(MapEvent::click(P2));
    assert_eq!(outer_ring(&editor, id), vec![P1, P2]);
    assert!(polygon_mode(&editor).state().snap_click_point().is_none());
}

#[test]
fn other_keys_are_ignored_while_drawing() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    for p in [P0, P1] {
        move_and_click(&mut editor, p);
    }
    editor.handle_event(MapEvent::mouse_move(P2));

    editor.handle_event(MapEvent::key_up(Key::Backspace));
    editor.handle_event(MapEvent::key_up(Key::Char('z')));

    assert_eq!(editor.mode_name(), ModeName::DrawPolygon);
    assert_eq!(polygon_mode(&editor).state().current_vertex_position(), 2);
    assert_eq!(outer_ring(&editor, id), vec![P0, P1, P2]);
    assert!(editor.take_events().is_empty());
}

#[test]
fn screen_only_clicks_are_unprojected() {
    let mut editor = drawing_editor(&Config::default());
    let id = polygon_mode(&editor).polygon_id();

    let mut click = MapEvent::click(P0);
    click.lng_lat = None;
    editor.handle_event(click.at_point(ScreenPoint::new(100.0, -100.0)));

    assert_eq!(outer_ring(&editor, id), vec![P2]);
}

#[test]
fn double_click_zoom_follows_map_at_startup() {
    // The map disagrees with the config; the map wins.
    let config = Config::default();
    let mut editor = drawing_editor_on(&config, HeadlessMap::new(100.0, false));

    editor.handle_event(MapEvent::key_up(Key::Escape));
    assert!(!editor.context().map.double_click_zoom_enabled());
}
