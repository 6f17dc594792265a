//! Reed-Solomon error correction for received blocks
use crate::encoder::reed_solomon::Gf256;

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` parity codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data followed by ECC) in place.
    ///
    /// Returns the number of corrected codewords.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = Self::find_error_locator(&syndrome)?;
        if sigma.len() - 1 > self.num_ecc_codewords / 2 {
            return Err("too many errors");
        }
        let error_positions = Self::find_error_positions(&sigma, received.len())?;
        let error_values =
            Self::find_error_values(&sigma, &syndrome, &error_positions, received.len())?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("uncorrectable error");
        }
        Ok(error_positions.len())
    }

    /// `S_i = c(alpha^i)`; `c[0]` is the coefficient of `x^(n-1)`
    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let root = Gf256::exp(i);
                received
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, root) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey; returns the error locator with trailing zeros removed
    fn find_error_locator(syndrome: &[u8]) -> Result<Vec<u8>, &'static str> {
        let mut sigma = vec![1u8];
        let mut b = vec![1u8];
        let mut delta_b: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let d = Gf256::div(delta, delta_b).ok_or("zero discrepancy base")?;
            let previous = sigma.clone();
            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, 0);
            }
            // sigma = sigma - d * x^m * b
            for (j, &coeff) in b.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(d, coeff);
            }

            if 2 * l <= i {
                b = previous;
                delta_b = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        Ok(sigma)
    }

    /// Chien search: roots of sigma are `alpha^-(n-1-pos)`
    fn find_error_positions(sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        let positions: Vec<usize> = (0..n)
            .filter(|&i| {
                let x_inv = Gf256::exp(255 - (n - 1 - i) % 255);
                sigma
                    .iter()
                    .rev()
                    .fold(0u8, |acc, &coeff| Gf256::mul(acc, x_inv) ^ coeff)
                    == 0
            })
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("wrong number of error positions found");
        }
        Ok(positions)
    }

    /// Forney: `e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)`
    fn find_error_values(
        sigma: &[u8],
        syndrome: &[u8],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(sigma.len() - 1) {
                *slot ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
        }

        error_positions
            .iter()
            .map(|&pos| {
                let exp = (n - 1 - pos) % 255;
                let x_k = Gf256::exp(exp);
                let x_inv = Gf256::exp(255 - exp);

                let omega_val = omega
                    .iter()
                    .rev()
                    .fold(0u8, |acc, &coeff| Gf256::mul(acc, x_inv) ^ coeff);

                // sigma'(x) = sum over odd i of sigma[i] * x^(i-1)
                let sigma_prime_val = sigma
                    .iter()
                    .enumerate()
                    .skip(1)
                    .step_by(2)
                    .fold(0u8, |acc, (i, &coeff)| {
                        acc ^ Gf256::mul(coeff, Gf256::pow(x_inv, i - 1))
                    });

                let quotient =
                    Gf256::div(omega_val, sigma_prime_val).ok_or("sigma derivative is zero")?;
                Ok(Gf256::mul(x_k, quotient))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::ReedSolomonEncoder;

    fn rs_encode(data: &[u8], num_ecc: usize) -> Vec<u8> {
        let mut codeword = data.to_vec();
        codeword.extend(ReedSolomonEncoder::new(num_ecc).remainder(data));
        codeword
    }

    #[test]
    fn test_rs_decode_no_errors() {
        let data = vec![0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut codeword = rs_encode(&data, 10);
        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(0));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_single_error() {
        let data = vec![0x00; 10];
        let mut codeword = rs_encode(&data, 10);
        codeword[3] ^= 0xAB;
        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(1));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_up_to_capacity() {
        let data = vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        let mut codeword = rs_encode(&data, 10);
        for (pos, flip) in [(0, 0xFF), (4, 0x42), (7, 0x13), (12, 0x01), (17, 0x80)] {
            codeword[pos] ^= flip;
        }
        assert_eq!(ReedSolomonDecoder::new(10).decode(&mut codeword), Ok(5));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_correct_errors_at_end() {
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        let mut codeword = rs_encode(&data, 8);
        let total = codeword.len();
        codeword[total - 1] ^= 0xFF;
        codeword[total - 2] ^= 0x33;
        assert_eq!(ReedSolomonDecoder::new(8).decode(&mut codeword), Ok(2));
        assert_eq!(&codeword[..data.len()], &data);
    }

    #[test]
    fn test_rs_rejects_too_many_errors() {
        let data: Vec<u8> = "4376471154038".bytes().collect();
        let mut codeword = rs_encode(&data, 4);
        for pos in 0..4 {
            codeword[pos] ^= 0x5A;
        }
        assert!(ReedSolomonDecoder::new(4).decode(&mut codeword).is_err());
    }
}
