//! Reed-Solomon error correction for QR codewords
//! Generator roots are alpha^0 .. alpha^(n-1), codewords are stored highest degree first

use crate::encoder::reed_solomon::Gf256;

/// Reed-Solomon decoder for one block
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks with `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning the number of corrected codewords
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        // Berlekamp-Massey
        let sigma = self.find_error_locator(&syndrome);
        let errors = sigma.len() - 1;
        if errors == 0 || errors * 2 > self.num_ecc_codewords {
            return Err("too many errors");
        }

        // Chien search
        let positions = self.find_error_positions(&sigma, received.len())?;

        // Forney
        let values = self.find_error_values(&sigma, &syndrome, &positions, received.len())?;

        for (&pos, &value) in positions.iter().zip(&values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("uncorrectable error");
        }
        Ok(positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        let n = received.len();
        (0..self.num_ecc_codewords)
            .map(|i| {
                received.iter().enumerate().fold(0u8, |sum, (j, &r)| {
                    sum ^ Gf256::mul(r, Gf256::pow(2, i * (n - 1 - j)))
                })
            })
            .collect()
    }

    /// Error locator coefficients in ascending order, trailing zeros trimmed
    fn find_error_locator(&self, syndrome: &[u8]) -> Vec<u8> {
        let mut sigma = vec![1u8];
        let mut b = vec![1u8];
        let mut delta_b: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(i) {
                if let Some(&s) = sigma.get(j) {
                    delta ^= Gf256::mul(s, syndrome[i - j]);
                }
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let previous = sigma.clone();
            let d = Gf256::div(delta, delta_b);
            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, 0);
            }
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
        sigma
    }

    /// Alpha exponent inverse of the locator for position `pos`
    fn locator_inverse(pos: usize, n: usize) -> u8 {
        let exp = (n - 1 - pos) % 255;
        Gf256::exp(255 - exp)
    }

    fn evaluate(poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .enumerate()
            .fold(0u8, |sum, (i, &c)| sum ^ Gf256::mul(c, Gf256::pow(x, i)))
    }

    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| Self::evaluate(sigma, Self::locator_inverse(pos, n)) == 0)
            .collect();
        if positions.len() != sigma.len() - 1 {
            return Err("wrong number of error positions");
        }
        Ok(positions)
    }

    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        // Formal derivative keeps odd powers only
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        positions
            .iter()
            .map(|&pos| {
                let x_inv = Self::locator_inverse(pos, n);
                let denominator = Self::evaluate(&sigma_prime, x_inv);
                if denominator == 0 {
                    return Err("sigma derivative is zero");
                }
                let x_k = Gf256::exp((n - 1 - pos) % 255);
                Ok(Gf256::mul(
                    x_k,
                    Gf256::div(Self::evaluate(&omega, x_inv), denominator),
                ))
            })
            .collect()
    }
}
