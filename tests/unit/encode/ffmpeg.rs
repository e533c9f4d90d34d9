use super::*;

fn cfg(width: u32, height: u32, audio: Option<AudioInputConfig>) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 30, den: 1 },
        audio,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(validate_sink_config(&cfg(0, 10, None)).is_err());
    assert!(validate_sink_config(&cfg(11, 10, None)).is_err());
    assert!(
        validate_sink_config(&SinkConfig {
            fps: Fps { num: 0, den: 1 },
            ..cfg(10, 10, None)
        })
        .is_err()
    );
    assert!(
        validate_sink_config(&cfg(
            10,
            10,
            Some(AudioInputConfig {
                path: PathBuf::from("a.mp3"),
                duration_secs: 0.0,
            })
        ))
        .is_err()
    );
    assert!(validate_sink_config(&cfg(1920, 1080, None)).is_ok());
}

#[test]
fn args_without_audio_disable_audio_stream() {
    let args = ffmpeg_args(&cfg(1920, 1080, None), Path::new("out/video.mp4"), true);
    assert_eq!(args[0], "-y");
    assert!(args.windows(2).any(|w| w == ["-s", "1920x1080"]));
    assert!(args.windows(2).any(|w| w == ["-r", "30/1"]));
    assert!(args.iter().any(|a| a == "-an"));
    assert!(!args.iter().any(|a| a == "aac"));
    assert_eq!(args.last().map(String::as_str), Some("out/video.mp4"));
}

#[test]
fn args_with_audio_map_and_cap_the_narration() {
    let audio = AudioInputConfig {
        path: PathBuf::from("public/narration.mp3"),
        duration_secs: 20.0,
    };
    let args = ffmpeg_args(&cfg(1920, 1080, Some(audio)), Path::new("o.mp4"), false);
    assert_eq!(args[0], "-n");
    assert!(args.windows(2).any(|w| w == ["-i", "public/narration.mp3"]));
    assert!(args.windows(2).any(|w| w == ["-map", "1:a:0"]));
    assert!(args.windows(2).any(|w| w == ["-c:a", "aac"]));
    assert!(args.windows(2).any(|w| w == ["-t", "20.000"]));
    assert!(!args.iter().any(|a| a == "-an"));

    // Video input must come before the audio input.
    let pipe = args.iter().position(|a| a == "pipe:0").unwrap();
    let mp3 = args.iter().position(|a| a == "public/narration.mp3").unwrap();
    assert!(pipe < mp3);
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_straight_over_black() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
