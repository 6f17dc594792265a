/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
/// GF(256) field operations using log/exp tables
pub struct Gf256;

const PRIMITIVE: u16 = 0x11D;

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        table[i + 255] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table
}

const fn build_log_table(exp: &[u8; 512]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const EXP: [u8; 512] = build_exp_table();

static EXP_TABLE: [u8; 512] = EXP;
static LOG_TABLE: [u8; 256] = build_log_table(&EXP);

impl Gf256 {
    /// `a * b`
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
    }

    /// `a / b`; `None` when `b` is zero
    pub fn div(a: u8, b: u8) -> Option<u8> {
        if b == 0 {
            return None;
        }
        if a == 0 {
            return Some(0);
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        Some(EXP_TABLE[log_a + 255 - log_b])
    }

    /// Multiplicative inverse; `None` for zero
    pub fn inv(a: u8) -> Option<u8> {
        Self::div(1, a)
    }

    /// `alpha^n`
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// `a^n`
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }
}

/// Reed-Solomon encoder for one block length
pub struct ReedSolomonEncoder {
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Encoder producing `degree` ECC codewords per block
    pub fn new(degree: usize) -> Self {
        Self {
            divisor: Self::generator(degree),
        }
    }

    /// Coefficients of `(x - a^0)(x - a^1)...(x - a^(degree-1))`, highest
    /// power first, leading 1 omitted
    fn generator(degree: usize) -> Vec<u8> {
        let mut result = vec![0u8; degree];
        if degree == 0 {
            return result;
        }
        result[degree - 1] = 1;
        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                result[j] = Gf256::mul(result[j], root);
                if j + 1 < degree {
                    result[j] ^= result[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        result
    }

    /// Number of ECC codewords per block
    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// Remainder of `data * x^degree` divided by the generator
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        if result.is_empty() {
            return result;
        }
        for &byte in data {
            let factor = byte ^ result[0];
            result.rotate_left(1);
            if let Some(last) = result.last_mut() {
                *last = 0;
            }
            for (r, &d) in result.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(d, factor);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf256_mul() {
        assert_eq!(Gf256::mul(0, 5), 0);
        assert_eq!(Gf256::mul(1, 5), 5);
        assert_eq!(Gf256::mul(2, 0x80), 0x1D);
        for a in 1..=255u8 {
            assert_eq!(Gf256::mul(a, Gf256::inv(a).unwrap()), 1);
        }
    }

    #[test]
    fn test_gf256_div() {
        let a = 0x53;
        let b = 0xCA;
        let product = Gf256::mul(a, b);
        assert_eq!(Gf256::div(product, b), Some(a));
        assert_eq!(Gf256::div(a, 0), None);
        assert_eq!(Gf256::pow(2, 8), 0x1D);
        assert_eq!(Gf256::exp(255), 1);
    }

    #[test]
    fn test_hello_world_ecc() {
        // "HELLO WORLD" at 1-M
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let rs = ReedSolomonEncoder::new(10);
        assert_eq!(
            rs.remainder(&data),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_codeword_has_zero_syndromes() {
        let data: Vec<u8> = (0..20).map(|i| (i * 37 + 11) as u8).collect();
        let rs = ReedSolomonEncoder::new(16);
        let mut codeword = data.clone();
        codeword.extend(rs.remainder(&data));
        let n = codeword.len();
        for i in 0..rs.degree() {
            let syndrome = codeword.iter().enumerate().fold(0u8, |acc, (j, &c)| {
                acc ^ Gf256::mul(c, Gf256::exp(i * (n - 1 - j)))
            });
            assert_eq!(syndrome, 0);
        }
    }
}
