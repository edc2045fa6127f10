use crate::Metric;

/// Edit distance over Unicode scalar values: the minimum number of single
/// character insertions, deletions and substitutions turning one string
/// into the other.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levenshtein;

impl<K> Metric<K> for Levenshtein
where
    K: AsRef<str> + ?Sized,
{
    fn distance(&self, a: &K, b: &K) -> u32 {
        levenshtein(a.as_ref(), b.as_ref())
    }
}

fn levenshtein(a: &str, b: &str) -> u32 {
    if a == b {
        return 0;
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<u32> = (0..=b_chars.len() as u32).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + u32::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
