use std::path::PathBuf;

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20">
  <rect x="0" y="0" width="40" height="20" fill="#336699"/>
</svg>"##;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_tvgtex")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "tvgtex.exe" } else { "tvgtex" });
            p
        })
}

fn write_input(dir_name: &str) -> (PathBuf, PathBuf) {
    let dir = PathBuf::from("target").join(dir_name);
    std::fs::create_dir_all(&dir).unwrap();
    let svg_path = dir.join("in.svg");
    std::fs::write(&svg_path, SVG).unwrap();
    (dir, svg_path)
}

#[test]
fn cli_frame_writes_png() {
    let (dir, svg_path) = write_input("cli_smoke_frame");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["frame", "--frame", "-3", "--width", "20", "--height", "10", "--in"])
        .arg(&svg_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (20, 10));
    assert_eq!(img.get_pixel(5, 5).0, [0x33, 0x66, 0x99, 255]);
}

#[test]
fn cli_info_prints_metadata() {
    let (_dir, svg_path) = write_input("cli_smoke_info");

    let output = std::process::Command::new(exe())
        .arg("info")
        .arg("--in")
        .arg(&svg_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("width:        40"));
    assert!(stdout.contains("height:       20"));
    assert!(stdout.contains("total_frames: 1"));
}
