use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, GPIO34, GPIO35, GPIO39};
use myrtio_tilt::{AxisReader, AxisSample};

/// 11 dB attenuation covers the sensor's 0..3.3 V output swing.
const ATTENUATION: Attenuation = Attenuation::_11dB;

type AccelAdc = Adc<'static, ADC1<'static>, Blocking>;

/// Three-channel analog accelerometer on ADC1.
pub struct AnalogAccelerometer {
    adc: AccelAdc,
    x: AdcPin<GPIO39<'static>, ADC1<'static>>,
    y: AdcPin<GPIO35<'static>, ADC1<'static>>,
    z: AdcPin<GPIO34<'static>, ADC1<'static>>,
}

impl AnalogAccelerometer {
    pub fn new(
        adc1: ADC1<'static>,
        x_pin: GPIO39<'static>,
        y_pin: GPIO35<'static>,
        z_pin: GPIO34<'static>,
    ) -> Self {
        let mut config = AdcConfig::new();
        let x = config.enable_pin(x_pin, ATTENUATION);
        let y = config.enable_pin(y_pin, ATTENUATION);
        let z = config.enable_pin(z_pin, ATTENUATION);
        let adc = Adc::new(adc1, config);

        Self { adc, x, y, z }
    }
}

impl AxisReader for AnalogAccelerometer {
    // A failed conversion reads as zero.
    fn read_axes(&mut self) -> AxisSample {
        let x = nb::block!(self.adc.read_oneshot(&mut self.x)).unwrap_or(0);
        let y = nb::block!(self.adc.read_oneshot(&mut self.y)).unwrap_or(0);
        let z = nb::block!(self.adc.read_oneshot(&mut self.z)).unwrap_or(0);

        AxisSample::new(i32::from(x), i32::from(y), i32::from(z))
    }
}
