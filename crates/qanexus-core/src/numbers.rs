/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut candidate = 5_u64;
    while candidate.saturating_mul(candidate) <= n {
        if n % candidate == 0 || n % (candidate + 2) == 0 {
            return false;
        }
        candidate += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::is_prime;

    #[test]
    fn small_primes() {
        let primes: Vec<u64> = (0..40).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    #[test]
    fn large_values() {
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
        assert!(!is_prime(1_000_000_007 * 3));
    }
}
