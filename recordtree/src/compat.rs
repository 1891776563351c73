pub use digest::{Digest, Output};
pub use sha2::Sha512;

/// A hash tree using SHA-512, the default hash function of record trees.
pub type Sha512Tree = crate::HashTree<Sha512>;

impl<D: Digest + Default> crate::Hasher for D {
    type Hash = Output<D>;

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(self) -> Self::Hash {
        self.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hex_literal::hex;

    fn assert_root_hash<D: Digest + Default, const N: usize>(data: &[&str], hashes: &[[u8; N]]) {
        assert_eq!(data.len(), hashes.len());

        let mut tree = crate::HashTree::<D>::default();

        for (block, hash) in data.iter().zip(hashes) {
            tree.append(block);

            let root_hash = tree.root().unwrap();
            assert_eq!(
                hex::decode(root_hash.as_str()).unwrap()[..],
                *hash,
                "Hash doesn't match when adding block: '{block}' -> {root_hash}"
            );
        }
    }

    const DATA: &[&str] = &[
        "hello world",
        "my name is Yoann",
        "the tree folds right then left",
        "odd layers carry a digest",
        "and the root commits to it all",
    ];

    #[test]
    fn md5() {
        assert_root_hash::<md5::Md5, 16>(
            DATA,
            &[
                hex!("c355ea7d157e4c060b393b4820124cf7"),
                hex!("d5a9a1691275b88b178b1d27848135bb"),
                hex!("0cabeb6d86f72de88fe7e8c324e7a038"),
                hex!("3e6d1e10f0ab3ad0334ed8e2e344436b"),
                hex!("40532f50d221585a9321738472c54056"),
            ],
        );
    }

    #[test]
    fn sha512() {
        assert_root_hash::<sha2::Sha512, 64>(
            DATA,
            &[
                hex!("32a7748bcc01a3f9eedb67c538170908e510fb244cece05edb152fd3ebbd6f4cf25c80b41b3896d627d1c25b346cea5c4a49c4b1bf19d96cd04aade8a09b3417"),
                hex!("f7467b9b46cb03f629ca276e550c3410d07fc972f0337867e9bac7d27fc95bfbe42527bdd51b16262549db7dd2c273549b8258451b58744236544d2c8a46f025"),
                hex!("421dc8dc916fb3f9b3508c11c021e0fd748311739a5e4e859930bef7ee9ae05039b11abeff6d7e5cb6ceb9f2be581967f8f3ced80760238bfb2ece20eb5d4db8"),
                hex!("e7c26d2c9cd1c7c4998507adaba8505d9d1e84f24e87496fbc77c83230a8007f9f7e12433c2bd11dc8106871a17a7ed46909bc215475bd25537e2d438cd824b3"),
                hex!("243922b8a7af2efb12ccdd0687da6a1b3a3fed3edf7af2505a1543b33167c8ed1082e6a7b3aebc43ef2355760649af9159a089daa4642071c1f78ec147c4a6de"),
            ],
        );
    }

    #[test]
    fn sha512_digests() {
        let record = crate::Record::new(0, 1, "");

        assert_eq!(
            record.digest::<sha2::Sha512>().as_str(),
            "6f67a2518ee70208fff0f33cc135adf06b7e1ac1a16891df82431cbead25c11e257c61f43d205bd9248eac9c52a06c6dbbb13fbb8b7c0c5a8b1b0f8724c0862c"
        );

        let (a, b): (crate::Digest, crate::Digest) = ("0a".parse().unwrap(), "0b".parse().unwrap());
        assert_eq!(
            crate::Digest::combine::<sha2::Sha512>(&a, &b).as_str(),
            "59fcf60843442043ce40d8cba96db1ddd2959aaffc93ab9d55111891fb727571372bd710f26044a04b0b04a94622bace31169be03e161976c50ab5e159513eb5"
        );
    }

    #[test]
    fn sha512_tree() {
        let mut tree = Sha512Tree::new();
        let mut roots = std::collections::HashSet::new();

        for value in 0..64 {
            tree.append(value);

            // each append moves the root
            assert!(roots.insert(tree.root().unwrap().clone()));
            assert_eq!(tree.root().unwrap().as_str().len(), 128);
        }

        for record in tree.history() {
            assert!(tree.is_included(record));
            assert!(tree.proof(record).unwrap().verify(record.digest::<sha2::Sha512>()));
            assert!(!tree.is_included(&record.with_value(-1)));
        }
    }

    #[test]
    fn sha512_ambiguous_fields() {
        let tree = Sha512Tree::from_iter(["a", "12", "c", "d", "e", "f", "g", "h", "i", "j", "k", "2"]);
        let (first, second) = (&tree.history()[1], &tree.history()[11]);

        assert_ne!(first.digest::<sha2::Sha512>(), second.digest::<sha2::Sha512>());
        assert!(tree.is_included(first) && tree.is_included(second));
        assert!(!tree.proof(first).unwrap().verify(second.digest::<sha2::Sha512>()));
    }
}
