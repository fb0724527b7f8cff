//! Integration/wait time conversions and plain register accessors

use crate::common::create_driver;
use tcs3430::{cycles_to_ms, registers, Persistence};

#[test]
fn test_integration_cycles_to_time() {
    let (mut sensor, _chip) = create_driver();

    for cycles in 0..=u8::MAX {
        sensor.set_integration_cycles(cycles).unwrap();
        assert_eq!(sensor.integration_cycles().unwrap(), cycles);
        assert_eq!(
            sensor.integration_time().unwrap(),
            ((cycles as f64 + 1.0) * 2.78) as f32
        );
    }
}

#[test]
fn test_integration_time_round_trip_is_lossy() {
    let (mut sensor, _chip) = create_driver();

    sensor.set_integration_cycles(35).unwrap();
    let ms = sensor.integration_time().unwrap();
    sensor.set_integration_time(ms).unwrap();
    assert_eq!(sensor.integration_cycles().unwrap(), 35);

    // 2 * 2.78 stored as f32 lands just below 5.56
    sensor.set_integration_cycles(1).unwrap();
    let ms = sensor.integration_time().unwrap();
    sensor.set_integration_time(ms).unwrap();
    assert_eq!(sensor.integration_cycles().unwrap(), 0);
}

#[test]
fn test_integration_time_is_not_clamped() {
    let (mut sensor, _chip) = create_driver();

    sensor.set_integration_time(0.0).unwrap();
    assert_eq!(sensor.integration_cycles().unwrap(), 255);

    sensor.set_integration_time(1000.0).unwrap();
    assert_eq!(sensor.integration_cycles().unwrap(), 102);
}

#[test]
fn test_wait_time() {
    let (mut sensor, chip) = create_driver();

    sensor.set_wait_time(280.0).unwrap();
    assert_eq!(chip.register(registers::WTIME), 99);
    assert_eq!(sensor.wait_cycles().unwrap(), 99);
    assert_eq!(sensor.wait_time().unwrap(), cycles_to_ms(99));

    sensor.set_wait_long(true).unwrap();
    assert!(sensor.wait_long().unwrap());
    // WLONG is not folded into the reported wait time
    assert_eq!(sensor.wait_time().unwrap(), cycles_to_ms(99));
}

#[test]
fn test_thresholds() {
    let (mut sensor, chip) = create_driver();

    sensor.set_als_threshold_low(0x0102).unwrap();
    sensor.set_als_threshold_high(0xFEDC).unwrap();

    assert_eq!(chip.register(registers::AILTL), 0x02);
    assert_eq!(chip.register(registers::AILTH), 0x01);
    assert_eq!(chip.register(registers::AIHTL), 0xDC);
    assert_eq!(chip.register(registers::AIHTH), 0xFE);
    assert_eq!(sensor.als_threshold_low().unwrap(), 0x0102);
    assert_eq!(sensor.als_threshold_high().unwrap(), 0xFEDC);
}

#[test]
fn test_persistence_round_trip() {
    let (mut sensor, _chip) = create_driver();

    for bits in 0..16u8 {
        let persistence = Persistence::from_bits(bits);
        assert_eq!(persistence as u8, bits);
        sensor.set_interrupt_persistence(persistence).unwrap();
        assert_eq!(sensor.interrupt_persistence().unwrap(), persistence);
    }
}

#[test]
fn test_auto_zero() {
    let (mut sensor, chip) = create_driver();
    assert_eq!(sensor.auto_zero_every_n().unwrap(), 0x7F);
    assert!(!sensor.auto_zero_mode().unwrap());

    sensor.set_auto_zero_mode(true).unwrap();
    sensor.set_auto_zero_every_n(10).unwrap();

    assert_eq!(chip.register(registers::AZ_CONFIG), 0x8A);
    assert!(sensor.auto_zero_mode().unwrap());
    assert_eq!(sensor.auto_zero_every_n().unwrap(), 10);
}
