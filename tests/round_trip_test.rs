// Encode/decode round-trip coverage for the GLB container codec
use geoglb::scene::{document, frame_glb, parse_container};
use geoglb::{
    decode_glb, decode_glb_bytes, encode_glb, write_glb, DecodeError, EncodeError, IndexData,
    LineBuffers, MeshBuffers,
};

fn sample_mesh() -> MeshBuffers {
    MeshBuffers {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-1.0, 5.0, 0.0]],
        colors: vec![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ],
        triangles: Some(vec![[0, 1, 2]]),
    }
}

#[test]
fn test_round_trip_is_byte_exact() {
    let mesh = sample_mesh();
    let bytes = encode_glb(&mesh, None).expect("encode");
    let scene = decode_glb_bytes(&bytes).expect("decode");

    assert!(scene.issues.is_empty(), "clean container decodes cleanly");
    assert_eq!(scene.positions.unwrap(), mesh.positions);
    assert_eq!(scene.colors.unwrap(), mesh.colors);
    assert_eq!(
        scene.triangles.unwrap(),
        IndexData::Indexed(vec![[0, 1, 2]])
    );
}

#[test]
fn test_accessor_min_max_is_true_min_max() {
    let bytes = encode_glb(&sample_mesh(), None).expect("encode");
    let (root, _) = parse_container(&bytes).expect("parse");

    let prim = &root.meshes[0].primitives[0];
    let position = &root.accessors[prim.attributes["POSITION"]];
    assert_eq!(position.min, vec![-1.0, 0.0, 0.0]);
    assert_eq!(position.max, vec![1.0, 5.0, 3.0]);

    let color = &root.accessors[prim.attributes["COLOR_0"]];
    assert_eq!(color.min, vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(color.max, vec![1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_unindexed_mesh_omits_index_metadata() {
    let mesh = MeshBuffers {
        positions: vec![[0.5, 0.5, 0.0], [1.5, 0.5, 0.0]],
        colors: vec![[0.1, 0.2, 0.3, 1.0], [0.4, 0.5, 0.6, 1.0]],
        triangles: None,
    };
    let bytes = encode_glb(&mesh, None).expect("encode");
    let (root, _) = parse_container(&bytes).expect("parse");

    let prim = &root.meshes[0].primitives[0];
    assert!(prim.indices.is_none());
    assert_eq!(prim.mode, Some(document::MODE_LINES));
    assert_eq!(root.accessors.len(), 2, "no index accessor emitted");
    assert_eq!(root.buffer_views.len(), 2, "no index bufferView emitted");

    let scene = decode_glb_bytes(&bytes).expect("decode");
    assert_eq!(scene.triangles, Some(IndexData::Unindexed));
    assert_eq!(scene.positions.unwrap().len(), 2);
}

#[test]
fn test_buffer_bookkeeping_covers_whole_blob() {
    let bytes = encode_glb(&sample_mesh(), None).expect("encode");
    let (root, blob) = parse_container(&bytes).expect("parse");

    let total: usize = root.buffer_views.iter().map(|v| v.byte_length).sum();
    assert_eq!(root.buffers.len(), 1, "exactly one backing buffer");
    assert_eq!(root.buffers[0].byte_length, total);
    // Blob may carry trailing chunk padding but never less than declared
    assert!(blob.len() >= total);

    // Views are back-to-back with no gaps
    let mut expected_offset = 0;
    for view in &root.buffer_views {
        assert_eq!(view.byte_offset, expected_offset);
        expected_offset += view.byte_length;
    }
}

#[test]
fn test_corrupt_index_range_fails_only_indices() {
    let bytes = encode_glb(&sample_mesh(), None).expect("encode");
    let (mut root, blob) = parse_container(&bytes).expect("parse");

    // Shrink the index bufferView so its length is no longer a whole number
    // of 12-byte triples
    let prim = root.meshes[0].primitives[0].clone();
    let index_view = root.accessors[prim.indices.unwrap()].buffer_view.unwrap();
    root.buffer_views[index_view].byte_length -= 1;

    let corrupt = frame_glb(&root, blob).expect("reframe");
    let scene = decode_glb_bytes(&corrupt).expect("decode still succeeds");

    assert!(scene.positions.is_some(), "positions decode unaffected");
    assert!(scene.colors.is_some(), "colors decode unaffected");
    assert!(scene.triangles.is_none(), "index decode failed");
    assert_eq!(scene.issues.len(), 1);
    assert!(matches!(
        scene.issues[0],
        DecodeError::RangeMismatch { buffer: "indices", .. }
    ));
}

#[test]
fn test_corrupt_position_range_keeps_colors_and_indices() {
    let bytes = encode_glb(&sample_mesh(), None).expect("encode");
    let (mut root, blob) = parse_container(&bytes).expect("parse");

    let prim = root.meshes[0].primitives[0].clone();
    let position_view = root.accessors[prim.attributes["POSITION"]]
        .buffer_view
        .unwrap();
    root.buffer_views[position_view].byte_length -= 2;

    let corrupt = frame_glb(&root, blob).expect("reframe");
    let scene = decode_glb_bytes(&corrupt).expect("decode still succeeds");

    assert!(scene.positions.is_none());
    assert!(scene.colors.is_some());
    assert!(matches!(scene.triangles, Some(IndexData::Indexed(_))));
    assert!(matches!(
        scene.issues[0],
        DecodeError::RangeMismatch { buffer: "positions", .. }
    ));
}

#[test]
fn test_line_set_becomes_second_primitive() {
    let mesh = sample_mesh();
    let lines = LineBuffers {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
        colors: vec![
            [1.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 0.0, 1.0],
        ],
        segments: vec![[0, 1], [1, 2]],
    };
    let bytes = encode_glb(&mesh, Some(&lines)).expect("encode");
    let (root, _) = parse_container(&bytes).expect("parse");

    let primitives = &root.meshes[0].primitives;
    assert_eq!(primitives.len(), 2);
    assert_eq!(primitives[0].mode, Some(document::MODE_TRIANGLES));
    assert_eq!(primitives[1].mode, Some(document::MODE_LINES));

    // Line accessors are their own triad with disjoint views
    let line_position = &root.accessors[primitives[1].attributes["POSITION"]];
    assert_eq!(line_position.count, 3);
    let line_indices = &root.accessors[primitives[1].indices.unwrap()];
    assert_eq!(line_indices.count, 4, "two segments flatten to 4 scalars");

    let surface_views: Vec<usize> = root.accessors
        [primitives[0].attributes["POSITION"]]
        .buffer_view
        .into_iter()
        .chain(root.accessors[primitives[1].attributes["POSITION"]].buffer_view)
        .collect();
    assert_ne!(surface_views[0], surface_views[1]);

    // Primitive 0 still decodes as before
    let scene = decode_glb_bytes(&bytes).expect("decode");
    assert_eq!(scene.positions.unwrap(), mesh.positions);
}

#[test]
fn test_empty_vertices_write_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.glb");

    let result = write_glb(&MeshBuffers::default(), None, &path);
    assert!(matches!(result, Err(EncodeError::EmptyVertexBuffer)));
    assert!(!path.exists(), "no partial file is left behind");
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mesh.glb");

    let mesh = sample_mesh();
    write_glb(&mesh, None, &path).expect("write");
    assert!(path.exists());

    let scene = decode_glb(&path).expect("decode");
    assert_eq!(scene.positions.unwrap(), mesh.positions);
    assert_eq!(scene.colors.unwrap(), mesh.colors);
}

#[test]
fn test_garbage_input_is_rejected() {
    assert!(matches!(
        decode_glb_bytes(b"PK\x03\x04 definitely not a scene container"),
        Err(DecodeError::BadMagic(_))
    ));
}
