//! End-to-end: load a project document, paint, apply rules, resize, clean up.

use tilecraft::prelude::*;
use tilecraft::model::resize_layer;

const PROJECT_JSON: &str = r##"{
    "TileSetDefinitions": [
        { "Uid": 1, "Identifier": "Cavern", "Path": "cavern.png", "TileGridSize": 16 }
    ],
    "LayerDefinitions": [
        {
            "Uid": 2,
            "Identifier": "Ground",
            "GridSize": 16,
            "LayerType": "IntGrid",
            "TileSetDefId": 1,
            "IntGridValues": [
                { "Value": 5, "Identifier": "Rock", "Color": "#808080" }
            ],
            "AutoRuleGroups": [
                {
                    "Uid": 3,
                    "Name": "Rocks",
                    "IsActive": true,
                    "Rules": [
                        {
                            "Uid": 4,
                            "Size": 3,
                            "Pattern": [-10000, -10000, -10000, -10000, 5, -10000, -10000, -10000, -10000],
                            "Chance": 1.0,
                            "BreakOnMatch": true,
                            "IsActive": true,
                            "TileIds": [42]
                        }
                    ]
                }
            ]
        },
        { "Uid": 6, "Identifier": "Entities", "GridSize": 16, "LayerType": "Entities" }
    ],
    "EntityDefinitions": [
        { "Uid": 7, "Identifier": "Chest", "Width": 16, "Height": 16, "Tags": ["item"] }
    ],
    "Worlds": [
        {
            "Identifier": "World",
            "DefaultGridSize": 16,
            "Levels": [
                {
                    "Uid": 8,
                    "Identifier": "Level_0",
                    "Width": 64,
                    "Height": 64,
                    "LayerInstances": [
                        {
                            "LayerDefId": 2,
                            "IntGrid": [0,0,0,0, 0,5,0,0, 0,0,0,0, 0,0,0,0]
                        },
                        {
                            "LayerDefId": 6,
                            "EntityInstances": [
                                { "EntityDefId": 7, "Position": { "X": 100, "Y": 100 }, "Width": 16, "Height": 16 },
                                { "EntityDefId": 7, "Position": { "X": 16, "Y": 32 }, "Width": 16, "Height": 16 }
                            ]
                        }
                    ]
                }
            ]
        }
    ],
    "NextUid": 9
}"##;

fn session() -> Session {
    let mut settings = EngineSettings::default();
    settings.rules.seed = Some(1);
    Session::new(Project::from_json_str(PROJECT_JSON).unwrap(), settings)
}

fn ground(session: &Session) -> &LayerInstance {
    session
        .project()
        .level(0, 8)
        .unwrap()
        .layer_instance(2)
        .unwrap()
}

#[test]
fn isolated_rock_gets_one_tile() {
    let mut session = session();

    let outcome = session.apply_rules(0, 8, 2).unwrap();

    assert_eq!(outcome, ApplyOutcome::Applied { placed: 1 });
    assert_eq!(
        ground(&session).auto_layer_tiles,
        vec![AutoLayerTile {
            tile_id: 42,
            cell: Point::new(1, 1)
        }]
    );
}

#[test]
fn painting_a_neighbor_breaks_the_match() {
    let mut session = session();
    session
        .project_mut()
        .level_mut(0, 8)
        .unwrap()
        .layer_instance_mut(2)
        .unwrap()
        .set_int_grid_value(4, 2, 1, 5);

    session.apply_rules(0, 8, 2).unwrap();

    assert!(ground(&session).auto_layer_tiles.is_empty());
}

#[test]
fn resize_then_rules_follow_moved_content() {
    let mut session = session();
    session
        .resize_level(0, 8, UPoint::new(96, 64), Point::new(1, 0))
        .unwrap();
    session.apply_rules(0, 8, 2).unwrap();

    let layer = ground(&session);
    assert_eq!(layer.int_grid.len(), 6 * 4);
    assert_eq!(layer.int_grid_value(6, 2, 1), Some(5));
    assert_eq!(layer.auto_layer_tiles[0].cell, Point::new(2, 1));
}

#[test]
fn resize_layer_grows_row_major() {
    let mut grid = vec![1, 2, 3, 4];
    resize_layer(UPoint::new(2, 2), UPoint::new(3, 3), Point::ZERO, &mut grid);
    assert_eq!(grid, vec![1, 2, 0, 3, 4, 0, 0, 0, 0]);
}

#[test]
fn cleanup_drops_out_of_bounds_entity_and_is_idempotent() {
    let mut session = session();

    let first = session.cleanup();
    assert_eq!(first.entities_removed, 1);
    let entities = &session
        .project()
        .level(0, 8)
        .unwrap()
        .layer_instance(6)
        .unwrap()
        .entity_instances;
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].position, Point::new(16, 32));

    let second = session.cleanup();
    assert!(second.is_clean(), "{second:?}");
}

#[test]
fn save_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");

    let mut session = session();
    session.apply_all_rules();
    session.save(&path).unwrap();

    let reloaded = Project::load(&path).unwrap();
    assert_eq!(&reloaded, session.project());
    assert_eq!(
        reloaded.level(0, 8).unwrap().layer_instance(2).unwrap().auto_layer_tiles.len(),
        1
    );
}
