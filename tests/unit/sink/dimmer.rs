use super::*;
use crate::foundation::color::rgb;
use crate::sink::MemorySink;

#[test]
fn full_brightness_is_lossless() {
    let (sink, log) = MemorySink::new(2, 1);
    let mut d = Dimmer::new(sink, 100);
    d.apply(&[rgb(1, 128, 255), rgb(0, 0, 0)]).unwrap();
    assert_eq!(log.last_pixel(0, 0), Some(rgb(1, 128, 255)));
}

#[test]
fn half_brightness_halves_channels_but_keeps_alpha() {
    let (sink, log) = MemorySink::new(1, 1);
    let mut d = Dimmer::new(sink, 50);
    d.apply(&[image::Rgba([200, 100, 0, 255])]).unwrap();
    assert_eq!(log.last_pixel(0, 0), Some(image::Rgba([100, 50, 0, 255])));

    d.set(0, rgb(255, 255, 255));
    assert_eq!(d.at(0), rgb(128, 128, 128));
}

#[test]
fn forwards_geometry_and_close() {
    let (sink, log) = MemorySink::new(3, 2);
    let mut d = Dimmer::new(sink, 250);
    assert_eq!(d.geometry(), (3, 2));
    d.close().unwrap();
    assert!(log.is_closed());
}
