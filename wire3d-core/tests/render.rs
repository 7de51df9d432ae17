use std::io::Write;

use wire3d_core::{obj, pipeline, raster, Camera, Color, Framebuffer, LoadError};

const PYRAMID: &str = "\
# square pyramid
v -1 0 -1
v  1 0 -1
v  1 0  1
v -1 0  1
v  0 2  0
vn 0 1 0

f 1 2 3 4
f 1//1 2//1 5//1
f 2 3 5
f -3 -2 -1
f 4 1 5
";

fn write_obj(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_reads_file() {
    let file = write_obj(PYRAMID);
    let mesh = obj::load(file.path()).unwrap();

    assert_eq!(mesh.vertices.len(), 5);
    assert_eq!(mesh.normals.len(), 1);
    assert_eq!(mesh.polygons.len(), 5);
    assert_eq!(mesh.polygons[1].records[2].normal, Some(0));
    let relative: Vec<_> = mesh.polygons[3].records.iter().map(|r| r.geometric).collect();
    assert_eq!(relative, vec![2, 3, 4]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = obj::load(dir.path().join("absent.obj")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn malformed_file_is_parse_error() {
    let file = write_obj("v 0 0 0\nv 1 0 0\nf 1 2\n");
    match obj::load(file.path()) {
        Err(LoadError::Parse { line, content, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "f 1 2");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn clear_transform_draw() {
    let file = write_obj(PYRAMID);
    let mut mesh = obj::load(file.path()).unwrap();
    mesh.initialize();
    mesh.normalize();
    mesh.reset_transform();

    let (width, height) = (160usize, 120usize);
    let mut buffer = Framebuffer::new(width, height);
    let background = Color::BLACK;
    let ink = Color::rgb(0, 255, 0);

    raster::clear(&mut buffer, background);
    pipeline::transform(&mut mesh, &Camera::default(), width as u32, height as u32);
    raster::draw_model(&mut buffer, &mesh, ink);

    let inked = buffer
        .pixels()
        .iter()
        .filter(|&&p| p == ink.to_argb())
        .count();
    assert!(inked > 0);
    assert!(buffer
        .pixels()
        .iter()
        .all(|&p| p == ink.to_argb() || p == background.to_argb()));

    // Every projected vertex of a normalized model in front of the camera is on screen
    for v in mesh.transformed() {
        assert!(v.x >= 0.0 && v.x < width as f32);
        assert!(v.y >= 0.0 && v.y < height as f32);
        let pixel = buffer.get(v.x.round() as i64, v.y.round() as i64);
        assert_eq!(pixel, Some(ink.to_argb()));
    }
}

#[test]
fn model_behind_camera_does_not_poison_cache() {
    let mut mesh = obj::parse_str(PYRAMID).unwrap();
    mesh.initialize();
    mesh.normalize();
    mesh.transform.translate(0.0, 0.0, 5.0);

    let mut buffer = Framebuffer::new(64, 48);
    raster::clear(&mut buffer, Color::BLACK);
    pipeline::transform(&mut mesh, &Camera::default(), 64, 48);
    raster::draw_model(&mut buffer, &mesh, Color::WHITE);

    assert!(mesh
        .transformed()
        .iter()
        .all(|v| v.iter().all(|c| c.is_finite())));
    assert_eq!(buffer.pixels().len(), 64 * 48);
}

#[test]
fn far_away_vertex_draws_within_bounds() {
    let mut mesh = obj::parse_str("v 0 0 0\nv 1e20 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
    mesh.initialize();

    let (width, height) = (64usize, 48usize);
    let mut buffer = Framebuffer::new(width, height);
    raster::clear(&mut buffer, Color::BLACK);
    pipeline::transform(&mut mesh, &Camera::default(), width as u32, height as u32);
    raster::draw_model(&mut buffer, &mesh, Color::WHITE);

    // The edge between the two near vertices is still drawn
    let white = Color::WHITE.to_argb();
    assert!(buffer.pixels().iter().any(|&p| p == white));
    assert_eq!(buffer.pixels().len(), width * height);
}
