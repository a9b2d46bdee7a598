//! Small helpers for pulling comma separated integer fields out of pattern
//! text. Fields are plain ASCII digit runs; anything else ends a run.

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn trailing_digits(text: &str) -> usize {
    text.bytes().rev().take_while(u8::is_ascii_digit).count()
}

/// Parses `N` comma separated integers at the very start of `text`. Whatever
/// follows the last field is ignored.
pub(crate) fn leading_fields<const N: usize>(text: &str) -> Option<[u32; N]> {
    let mut fields = [0u32; N];
    let mut rest = text;

    for (index, field) in fields.iter_mut().enumerate() {
        if index > 0 {
            rest = rest.strip_prefix(',')?;
        }
        let len = leading_digits(rest);
        if len == 0 {
            return None;
        }
        let (digits, tail) = rest.split_at(len);
        *field = digits.parse().ok()?;
        rest = tail;
    }

    Some(fields)
}

/// Parses `N` comma separated integers at the very end of `text`. Whatever
/// precedes the first field is ignored.
pub(crate) fn trailing_fields<const N: usize>(text: &str) -> Option<[u32; N]> {
    let mut fields = [0u32; N];
    let mut rest = text;

    for index in (0..N).rev() {
        if index + 1 < N {
            rest = rest.strip_suffix(',')?;
        }
        let len = trailing_digits(rest);
        if len == 0 {
            return None;
        }
        let (head, digits) = rest.split_at(rest.len() - len);
        fields[index] = digits.parse().ok()?;
        rest = head;
    }

    Some(fields)
}

/// Integer part of a `<digits>.<digits>` decimal, i.e. the value truncated
/// toward zero. Values too large for `u32` saturate.
pub(crate) fn truncated_decimal(text: &str) -> Option<u32> {
    let (whole, fraction) = text.split_once('.')?;
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    Some(whole.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_fields_and_ignores_tail() {
        assert_eq!(leading_fields::<3>("18,1,8=0,11"), Some([18, 1, 8]));
        assert_eq!(leading_fields::<3>("18,1"), None);
        assert_eq!(leading_fields::<3>(",18,1,8"), None);
    }

    #[test]
    fn reads_trailing_fields_after_arbitrary_prefix() {
        assert_eq!(
            trailing_fields::<5>("Label+pulse:0,1,8=0,11,16,1,1"),
            Some([0, 11, 16, 1, 1])
        );
        assert_eq!(trailing_fields::<5>("1,2,3,4"), None);
        assert_eq!(trailing_fields::<5>("1,2,3,4,"), None);
    }

    #[test]
    fn overflowing_fields_are_rejected() {
        assert_eq!(leading_fields::<1>("99999999999"), None);
        assert_eq!(trailing_fields::<2>("1,99999999999"), None);
    }

    #[test]
    fn decimals_truncate_toward_zero() {
        assert_eq!(truncated_decimal("65.99"), Some(65));
        assert_eq!(truncated_decimal("100.00"), Some(100));
        assert_eq!(truncated_decimal("0.50"), Some(0));
        assert_eq!(truncated_decimal("65"), None);
        assert_eq!(truncated_decimal(".5"), None);
        assert_eq!(truncated_decimal("6x.00"), None);
    }
}
