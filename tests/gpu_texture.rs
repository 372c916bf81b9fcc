#[cfg(feature = "gpu")]
mod gpu_texture {
    use tvg_texture::{TextureTarget, TvgError, WgpuTexture};

    fn headless_or_skip() -> Option<WgpuTexture> {
        match WgpuTexture::headless() {
            Ok(tex) => Some(tex),
            Err(TvgError::Texture(msg)) => {
                eprintln!("skipping gpu texture test: {msg}");
                None
            }
            Err(other) => panic!("unexpected headless error: {other}"),
        }
    }

    #[test]
    fn gpu_texture_upload_and_release() {
        let Some(mut tex) = headless_or_skip() else {
            return;
        };
        assert_eq!(tex.size(), (0, 0));
        assert!(tex.texture().is_none());

        tex.reinitialize(4, 2).unwrap();
        assert_eq!(tex.size(), (4, 2));
        assert!(tex.texture().is_some());
        assert!(tex.create_view().is_some());

        assert!(matches!(tex.upload(&[0; 4]), Err(TvgError::Texture(_))));
        tex.upload(&[255; 4 * 2 * 4]).unwrap();

        tex.reinitialize(3, 3).unwrap();
        assert_eq!(tex.size(), (3, 3));
        tex.upload(&[0; 3 * 3 * 4]).unwrap();

        tex.release();
        assert_eq!(tex.size(), (0, 0));
        assert!(tex.texture().is_none());
        assert!(matches!(tex.upload(&[0; 36]), Err(TvgError::Texture(_))));
    }
}
