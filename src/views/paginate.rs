//! Fixed-size pages over any ordered sequence

use crate::ForecastError;

/// Slice `[index * size, min(len, (index + 1) * size))`; empty past the end.
pub fn page<T>(items: &[T], page_size: usize, page_index: usize) -> Result<&[T], ForecastError> {
    check_size(page_size)?;
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Ok(&items[start..end])
}

/// `ceil(len / page_size)`
pub fn page_count(len: usize, page_size: usize) -> Result<usize, ForecastError> {
    check_size(page_size)?;
    Ok(len.div_ceil(page_size))
}

/// Largest valid page index for `len` items; 0 when there are none.
pub fn clamp_page(page_index: usize, len: usize, page_size: usize) -> Result<usize, ForecastError> {
    let count = page_count(len, page_size)?;
    Ok(page_index.min(count.saturating_sub(1)))
}

fn check_size(page_size: usize) -> Result<(), ForecastError> {
    if page_size == 0 {
        Err(ForecastError::InvalidPageSize { size: page_size })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 3)]
    #[case(1, 3)]
    #[case(7, 3)]
    #[case(9, 3)]
    #[case(10, 1)]
    #[case(24, 10)]
    fn test_pages_partition_sequence(#[case] len: usize, #[case] size: usize) {
        let items: Vec<usize> = (0..len).collect();
        let count = page_count(len, size).unwrap();

        let joined: Vec<usize> = (0..count)
            .flat_map(|k| page(&items, size, k).unwrap().to_vec())
            .collect();
        assert_eq!(joined, items);

        for k in count..count + 3 {
            assert!(page(&items, size, k).unwrap().is_empty());
        }
    }

    #[test]
    fn test_last_page_is_short() {
        let items: Vec<u8> = (0..24).collect();
        assert_eq!(page(&items, 10, 2).unwrap(), &[20, 21, 22, 23]);
        assert_eq!(page_count(24, 10).unwrap(), 3);
    }

    #[test]
    fn test_huge_index_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(page(&items, 2, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_zero_page_size() {
        let items = [1, 2, 3];
        assert_eq!(
            page(&items, 0, 0).unwrap_err(),
            ForecastError::InvalidPageSize { size: 0 }
        );
        assert!(page_count(3, 0).is_err());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 24, 10).unwrap(), 2);
        assert_eq!(clamp_page(1, 24, 10).unwrap(), 1);
        assert_eq!(clamp_page(3, 0, 10).unwrap(), 0);
    }
}
