use futures::TryStreamExt;

use ghostline_playback::{BlockLoader, DirectoryLoader, FileSaver, MemoryLoader, Saver};

#[tokio::test]
async fn directory_loader_reads_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    tokio::fs::write(dir.path().join("b.json"), b"second").await.unwrap();
    tokio::fs::write(dir.path().join("a.json"), b"first").await.unwrap();
    tokio::fs::write(dir.path().join("notes.txt"), b"skip me").await.unwrap();
    tokio::fs::create_dir(dir.path().join("nested.json")).await.unwrap();

    let loader = DirectoryLoader::new(dir.path()).with_extension("json");
    let blocks: Vec<Vec<u8>> = loader.load_blocks().try_collect().await.expect("read");
    assert_eq!(blocks, vec![b"first".to_vec(), b"second".to_vec()]);

    let all: Vec<Vec<u8>> = DirectoryLoader::new(dir.path())
        .load_blocks()
        .try_collect()
        .await
        .expect("read");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn directory_loader_reads_recorded_fixtures() {
    use ghostline_test_fixtures::ghosts;

    let walk = ghosts::path("linear-walk").expect("fixture path");
    let dir = walk.parent().expect("fixture dir");
    let blocks: Vec<Vec<u8>> = DirectoryLoader::new(dir)
        .with_extension("json")
        .load_blocks()
        .try_collect()
        .await
        .expect("read");
    assert_eq!(blocks.len(), ghosts::keys().len());
    let expected = ghosts::bytes("linear-walk").expect("fixture");
    assert!(blocks.contains(&expected));
}

#[tokio::test]
async fn missing_directory_is_a_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loader = DirectoryLoader::new(dir.path().join("absent"));
    let err = loader
        .load_blocks()
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert_eq!(err.category(), "load");
}

#[tokio::test]
async fn file_saver_creates_parent_dirs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("runs").join("ghost-0.json");
    FileSaver::new(&path).save(b"[]").await.expect("save");
    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"[]");
}

#[tokio::test]
async fn memory_loader_yields_blocks_in_order() {
    let loader = MemoryLoader::new(vec![b"x".to_vec(), b"y".to_vec()]);
    let blocks: Vec<Vec<u8>> = loader.load_blocks().try_collect().await.unwrap();
    assert_eq!(blocks, vec![b"x".to_vec(), b"y".to_vec()]);
}

#[cfg(feature = "lz4")]
#[tokio::test]
async fn lz4_compressor_roundtrip() {
    use ghostline_playback::{Compressor, Lz4Compressor};

    let raw = ghostline_test_fixtures::ghosts::bytes("animated").expect("fixture");
    let packed = Lz4Compressor.compress(&raw).await.unwrap();
    assert_eq!(Lz4Compressor.decompress(&packed).await.unwrap(), raw);
    assert!(Lz4Compressor.decompress(b"\x10\x00").await.is_err());
}
