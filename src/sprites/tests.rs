use crate::sprites::{AFTER_IMAGE_LIFETIME, AfterImage, dash_color};
use crate::sprites::palette::ALPHA;

#[test]
fn test_after_image_fades_to_nothing() {
    let mut image = AfterImage::new();
    assert_eq!(image.alpha(), ALPHA);

    let mut previous = image.alpha();
    for _ in 0..AFTER_IMAGE_LIFETIME {
        image.remaining -= 1;
        assert!(image.alpha() < previous);
        previous = image.alpha();
    }
    assert_eq!(image.alpha(), 0.0);
}

#[test]
fn test_dash_colour_changes_with_charges() {
    assert_ne!(dash_color(0), dash_color(1));
    assert_ne!(dash_color(1), dash_color(2));
    assert_eq!(dash_color(2), dash_color(5));
}
