use ghost_maze_core::{Cell, CellCoord, Grid};
use ghost_maze_text_io::{export_path, import_path, LevelIoError};

#[test]
fn export_creates_missing_directories() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("levels").join("nested").join("level.txt");
    let mut grid = Grid::filled(4, 6, Cell::Border);
    grid.set(CellCoord::new(1, 1), Cell::Empty);
    grid.set(CellCoord::new(2, 3), Cell::GhostDoor);

    export_path(&grid, &path).expect("export succeeds");
    let mut restored = Grid::empty(4, 6);
    let report = import_path(&mut restored, &path).expect("import succeeds");

    assert_eq!(restored, grid);
    assert_eq!(report.rows_read, 4);
    assert_eq!(
        std::fs::read_to_string(&path).expect("file exists"),
        "BBBBBB\nB.BBBB\nBBBDBB\nBBBBBB\n"
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("absent.txt");
    let mut grid = Grid::filled(2, 2, Cell::Wall);

    let error = import_path(&mut grid, &path).expect_err("file does not exist");

    match error {
        LevelIoError::Open { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(grid, Grid::filled(2, 2, Cell::Wall));
}

#[test]
fn export_overwrites_previous_contents() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("level.txt");

    export_path(&Grid::filled(3, 3, Cell::Wall), &path).expect("first export");
    export_path(&Grid::filled(2, 2, Cell::Empty), &path).expect("second export");

    assert_eq!(
        std::fs::read_to_string(&path).expect("file exists"),
        "..\n..\n"
    );
}
