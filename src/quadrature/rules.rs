//! Gauss-Kronrod quadrature rules.
//!
//! Each rule evaluates the integrand once per node and returns the Kronrod estimate together
//! with the quantities the adaptive driver needs to judge it: an error estimate built from the
//! difference between the embedded Gauss and Kronrod results, the integral of `|f|`, and the
//! integral of `|f - mean(f)|`.

use crate::math::constants::{MACHINE_EPSILON, UNDERFLOW};

/// Abscissae of the 21-point Kronrod rule. Odd positions (1, 3, ..) are the 10-point Gauss nodes.
const XGK21: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0,
];

const WGK21: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_958_109_831_074,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

const WG10: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

/// Abscissae of the 15-point Kronrod rule. Odd positions are the 7-point Gauss nodes.
const XGK15: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK15: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights of the 7-point rule, interleaved with zeros for the Kronrod-only nodes.
const WG7: [f64; 8] = [
    0.0,
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.0,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.0,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.0,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// The outcome of applying a rule to one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RuleEstimate {
    /// Kronrod approximation of the integral.
    pub result: f64,
    /// Estimate of the absolute error of `result`.
    pub abs_error: f64,
    /// Approximation of the integral of `|f|`.
    pub abs_integral: f64,
    /// Approximation of the integral of `|f - I / (b - a)|`.
    pub deviation: f64,
}

/// A quadrature rule applied by the adaptive driver to `[a, b]`.
pub(crate) trait Rule {
    /// Number of integrand evaluations per application.
    fn evaluations(&self) -> usize;

    fn apply<F>(&self, f: &mut F, a: f64, b: f64) -> RuleEstimate
    where
        F: FnMut(f64) -> f64;
}

/// The 21-point Gauss-Kronrod rule on a finite interval.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Kronrod21;

impl Rule for Kronrod21 {
    fn evaluations(&self) -> usize {
        21
    }

    fn apply<F>(&self, f: &mut F, a: f64, b: f64) -> RuleEstimate
    where
        F: FnMut(f64) -> f64,
    {
        let centr = 0.5 * (a + b);
        let hlgth = 0.5 * (b - a);
        let dhlgth = hlgth.abs();

        let mut fv1 = [0.0; 10];
        let mut fv2 = [0.0; 10];

        let fc = f(centr);
        let mut resg = 0.0;
        let mut resk = WGK21[10] * fc;
        let mut resabs = resk.abs();

        for j in 0..5 {
            let jtw = 2 * j + 1;
            let absc = hlgth * XGK21[jtw];
            let fval1 = f(centr - absc);
            let fval2 = f(centr + absc);
            fv1[jtw] = fval1;
            fv2[jtw] = fval2;
            let fsum = fval1 + fval2;
            resg += WG10[j] * fsum;
            resk += WGK21[jtw] * fsum;
            resabs += WGK21[jtw] * (fval1.abs() + fval2.abs());
        }

        for j in 0..5 {
            let jtwm1 = 2 * j;
            let absc = hlgth * XGK21[jtwm1];
            let fval1 = f(centr - absc);
            let fval2 = f(centr + absc);
            fv1[jtwm1] = fval1;
            fv2[jtwm1] = fval2;
            let fsum = fval1 + fval2;
            resk += WGK21[jtwm1] * fsum;
            resabs += WGK21[jtwm1] * (fval1.abs() + fval2.abs());
        }

        let reskh = resk * 0.5;
        let mut resasc = WGK21[10] * (fc - reskh).abs();
        for j in 0..10 {
            resasc += WGK21[j] * ((fv1[j] - reskh).abs() + (fv2[j] - reskh).abs());
        }

        finish(resk * hlgth, resg, resk, hlgth, resabs * dhlgth, resasc * dhlgth)
    }
}

/// The 15-point Gauss-Kronrod rule applied to a (semi-)infinite range mapped onto `(0, 1]`.
///
/// The substitution is `x = bound + direction * (1 - t) / t`. With `two_sided` set the rule
/// integrates `f(x) + f(-x)`, which covers the whole real line when `bound` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Kronrod15Infinite {
    pub bound: f64,
    pub direction: f64,
    pub two_sided: bool,
}

impl Kronrod15Infinite {
    #[inline]
    fn transformed<F>(&self, f: &mut F, t: f64) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let x = self.bound + self.direction * (1.0 - t) / t;
        let mut value = f(x);
        if self.two_sided {
            value += f(-x);
        }
        (value / t) / t
    }
}

impl Rule for Kronrod15Infinite {
    fn evaluations(&self) -> usize {
        if self.two_sided { 30 } else { 15 }
    }

    fn apply<F>(&self, f: &mut F, a: f64, b: f64) -> RuleEstimate
    where
        F: FnMut(f64) -> f64,
    {
        let centr = 0.5 * (a + b);
        let hlgth = 0.5 * (b - a);

        let mut fv1 = [0.0; 7];
        let mut fv2 = [0.0; 7];

        let fc = self.transformed(f, centr);
        let mut resg = WG7[7] * fc;
        let mut resk = WGK15[7] * fc;
        let mut resabs = resk.abs();

        for j in 0..7 {
            let absc = hlgth * XGK15[j];
            let absc1 = centr - absc;
            let absc2 = centr + absc;
            let fval1 = self.transformed(f, absc1);
            let fval2 = self.transformed(f, absc2);
            fv1[j] = fval1;
            fv2[j] = fval2;
            let fsum = fval1 + fval2;
            resg += WG7[j] * fsum;
            resk += WGK15[j] * fsum;
            resabs += WGK15[j] * (fval1.abs() + fval2.abs());
        }

        let reskh = resk * 0.5;
        let mut resasc = WGK15[7] * (fc - reskh).abs();
        for j in 0..7 {
            resasc += WGK15[j] * ((fv1[j] - reskh).abs() + (fv2[j] - reskh).abs());
        }

        finish(resk * hlgth, resg, resk, hlgth, resabs * hlgth, resasc * hlgth)
    }
}

/// Turns the raw Gauss/Kronrod sums into a `RuleEstimate`, scaling the Gauss-Kronrod
/// difference into the conservative QUADPACK error estimate.
#[inline]
fn finish(
    result: f64,
    resg: f64,
    resk: f64,
    hlgth: f64,
    resabs: f64,
    resasc: f64,
) -> RuleEstimate {
    let mut abserr = ((resk - resg) * hlgth).abs();
    if resasc != 0.0 && abserr != 0.0 {
        abserr = resasc * (200.0 * abserr / resasc).powf(1.5).min(1.0);
    }
    if resabs > UNDERFLOW / (50.0 * MACHINE_EPSILON) {
        abserr = abserr.max((MACHINE_EPSILON * 50.0) * resabs);
    }
    RuleEstimate {
        result,
        abs_error: abserr,
        abs_integral: resabs,
        deviation: resasc,
    }
}
