use std::io::Cursor;

use mcmeta_anim::{
    AnimErrorKind, AnimationDescriptor, ConvertOptions, ExportType, FrameEntry, SliceThreading,
    convert, convert_tagged, convert_to_apng, convert_to_gif, extract_frames,
};

const SCENARIO_A: &[u8] = include_bytes!("data/scenario_a.png.mcmeta");
const SCENARIO_B: &[u8] = include_bytes!("data/scenario_b.png.mcmeta");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// `count` stacked `size`x`size` tiles; tile `i` is filled with red = `i * 40`.
fn sheet_png(size: u32, count: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(size, size * count, |_, y| {
        image::Rgba([(y / size * 40) as u8, 0, 0, 255])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn apng_delays(bytes: &[u8]) -> Vec<(u16, u16)> {
    let mut reader = png::Decoder::new(Cursor::new(bytes)).read_info().unwrap();
    let num_frames = reader.info().animation_control.unwrap().num_frames;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let mut delays = Vec::new();
    for _ in 0..num_frames {
        reader.next_frame(&mut buf).unwrap();
        let fctl = reader.info().frame_control.unwrap();
        delays.push((fctl.delay_num, fctl.delay_den));
    }
    delays
}

fn gif_delays(bytes: &[u8]) -> Vec<u16> {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = opts.read_info(Cursor::new(bytes)).unwrap();
    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        delays.push(frame.delay);
    }
    delays
}

#[test]
fn scenario_a_uniform_delays_as_apng() {
    init_tracing();
    let png = sheet_png(16, 4);
    let out = convert(&png, SCENARIO_A, &ConvertOptions::default()).unwrap();

    assert_eq!(out.export_type, ExportType::Apng);
    assert_eq!(apng_delays(&out.export), [(200, 1000); 4]);
}

#[test]
fn scenario_b_custom_order_as_apng() {
    let png = sheet_png(16, 4);
    let out = convert(&png, SCENARIO_B, &ConvertOptions::default()).unwrap();
    assert_eq!(
        apng_delays(&out.export),
        [(200, 1000), (500, 1000), (200, 1000)]
    );

    let desc = AnimationDescriptor::new(4.0).with_frame_order(vec![
        FrameEntry::Index(0),
        FrameEntry::Timed {
            index: 2,
            time: Some(10.0),
        },
        FrameEntry::Index(1),
    ]);
    let set = extract_frames(&png, &desc, &ConvertOptions::default()).unwrap();
    let order: Vec<usize> = set.frames.iter().map(|f| f.tile_index).collect();
    assert_eq!(order, [0, 2, 1]);
    let reds: Vec<u8> = set.frames.iter().map(|f| f.pixels[0]).collect();
    assert_eq!(reds, [0, 80, 40]);
}

#[test]
fn scenario_b_custom_order_as_gif() {
    let png = sheet_png(16, 4);
    let opts = ConvertOptions::default().with_export_type(ExportType::Gif);
    let out = convert(&png, SCENARIO_B, &opts).unwrap();

    assert_eq!(out.export_type, ExportType::Gif);
    assert_eq!(&out.export[..6], b"GIF89a");
    assert_eq!(gif_delays(&out.export), [20, 50, 20]);
}

#[test]
fn scenario_c_geometry_error_for_every_format() {
    let img = image::RgbaImage::new(16, 50);
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    for export_type in [ExportType::Apng, ExportType::Gif] {
        let opts = ConvertOptions::default().with_export_type(export_type);
        let err = convert(&png, SCENARIO_A, &opts).unwrap_err();
        assert_eq!(err.kind(), AnimErrorKind::Geometry);
        assert!(err.to_string().contains("height (50)"));
    }
}

#[test]
fn tick_speed_scales_output_delays() {
    let png = sheet_png(8, 2);
    let opts = ConvertOptions::default().with_tick_speed(40.0);
    let bytes = convert_to_apng(&png, SCENARIO_A, &opts).unwrap();
    assert_eq!(apng_delays(&bytes), [(100, 1000); 2]);
}

#[test]
fn direct_entry_points_ignore_export_type() {
    let png = sheet_png(8, 2);
    let opts = ConvertOptions::default().with_export_type(ExportType::Gif);
    let apng = convert_to_apng(&png, SCENARIO_A, &opts).unwrap();
    assert_eq!(&apng[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

    let gif = convert_to_gif(&png, SCENARIO_A, &ConvertOptions::default()).unwrap();
    assert_eq!(&gif[..6], b"GIF89a");
}

#[test]
fn tagged_conversion_echoes_tag_and_rejects_unknown() {
    let png = sheet_png(8, 2);
    let out = convert_tagged(&png, SCENARIO_A, "gif", &ConvertOptions::default()).unwrap();
    assert_eq!(out.export_type.as_str(), "gif");

    let err = convert_tagged(&png, SCENARIO_A, "webp", &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), AnimErrorKind::UnsupportedFormat);
}

#[test]
fn empty_frame_order_has_no_frames() {
    let png = sheet_png(8, 3);
    let err = convert(
        &png,
        br#"{"animation":{"frametime":1,"frames":[]}}"#,
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), AnimErrorKind::NoFrames);
}

#[test]
fn invalid_inputs_are_validation_errors() {
    let png = sheet_png(8, 2);

    let err = convert(b"GIF89a....", SCENARIO_A, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), AnimErrorKind::Validation);

    let err = convert(&png, b"{", &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), AnimErrorKind::Validation);

    let err = convert(&png, br#"{"animation":{}}"#, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), AnimErrorKind::Validation);
}

#[test]
fn rgb_sheet_gets_alpha_and_converts() {
    let img = image::RgbImage::from_pixel(4, 12, image::Rgb([1, 2, 3]));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let desc = AnimationDescriptor::new(2.0);
    let set = extract_frames(&png, &desc, &ConvertOptions::default()).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.frames.iter().all(|f| f.pixels.len() == 4 * 4 * 4));
    assert_eq!(&set.frames[0].pixels[..4], &[1, 2, 3, 255]);

    let out = convert(&png, SCENARIO_A, &ConvertOptions::default()).unwrap();
    assert_eq!(apng_delays(&out.export).len(), 3);
}

#[test]
fn parallel_slicing_produces_identical_output() {
    let png = sheet_png(16, 8);
    let seq = convert(&png, SCENARIO_B, &ConvertOptions::default()).unwrap();
    let par = convert(
        &png,
        SCENARIO_B,
        &ConvertOptions::default().with_threading(SliceThreading {
            parallel: true,
            threads: Some(4),
        }),
    )
    .unwrap();
    assert_eq!(seq.export, par.export);
}

#[test]
fn zero_frametime_clamps_timed_entries_only() {
    let png = sheet_png(8, 2);
    let mcmeta = br#"{"animation":{"frametime":0,"frames":[{"index":0},1]}}"#;
    let out = convert(&png, mcmeta, &ConvertOptions::default()).unwrap();
    assert_eq!(apng_delays(&out.export), [(50, 1000), (0, 1000)]);
}

#[test]
fn whole_number_float_indices_convert() {
    let png = sheet_png(8, 3);
    let mcmeta = br#"{"animation":{"frametime":2,"frames":[2.0,{"index":0.0,"time":4}]}}"#;
    let out = convert(&png, mcmeta, &ConvertOptions::default()).unwrap();
    assert_eq!(apng_delays(&out.export), [(100, 1000), (200, 1000)]);
}
