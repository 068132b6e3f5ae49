//! Summary of the protein domains a fusion partner keeps.

use std::collections::BTreeMap;

use crate::annotation::{GeneAnnotation, GeneId};
use crate::contig::{ContigId, Position};
use crate::strand::{Direction, Strand};

use super::ProteinDomains;

/// Describe which domains of `gene` are retained on the kept side of `breakpoint`.
///
/// Returns a comma-separated `name(NN%)` list sorted by domain name, where the
/// percentage is the floor of retained bases over total domain length summed
/// across all domains sharing that name. An empty string means nothing to
/// report: the gene is not protein-coding, the predicted strand is ambiguous or
/// contradicts the gene, or no domain of the gene starts in the retained part.
#[allow(clippy::too_many_arguments)]
pub fn annotate_retained_protein_domains(
    contig: ContigId,
    breakpoint: Position,
    predicted_strand: Strand,
    predicted_strand_ambiguous: bool,
    gene_id: GeneId,
    annotation: &GeneAnnotation,
    direction: Direction,
    domains: &ProteinDomains,
) -> String {
    let gene = annotation.gene(gene_id);

    if !gene.is_protein_coding {
        return String::new();
    }

    if predicted_strand_ambiguous || predicted_strand != gene.strand {
        return String::new();
    }

    if !domains.index().has_contig(contig) {
        return String::new();
    }

    // part of the gene that is retained in the fusion
    let (start, end) = match direction {
        Direction::Upstream => (breakpoint, gene.end),
        Direction::Downstream => (gene.start, breakpoint),
    };

    // domain name → (total length, retained bases)
    let mut retained: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for domain in domains.starting_in(contig, start, end) {
        if domain.gene != gene_id {
            continue;
        }
        let length = domain.len();
        let retained_bases = match direction {
            Direction::Upstream => domain.end - domain.start.max(breakpoint) + 1,
            Direction::Downstream => domain.end.min(breakpoint) - domain.start + 1,
        };
        let entry = retained.entry(domain.name.as_str()).or_default();
        entry.0 += u64::try_from(length).unwrap_or(0);
        entry.1 += u64::try_from(retained_bases).unwrap_or(0);
    }

    retained
        .into_iter()
        .filter(|(_, (length, _))| *length > 0)
        .map(|(name, (length, retained_bases))| {
            format!("{name}({}%)", retained_bases * 100 / length)
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Gene;
    use crate::domains::ProteinDomain;

    const CONTIG: ContigId = 2;

    struct Fixture {
        annotation: GeneAnnotation,
        gene: GeneId,
        other_gene: GeneId,
    }

    fn fixture(strand: Strand, is_protein_coding: bool) -> Fixture {
        let mut annotation = GeneAnnotation::new();
        let gene = annotation
            .add_gene(Gene {
                id: "ENSG1".to_string(),
                name: "GENE1".to_string(),
                contig: CONTIG,
                start: 1000,
                end: 5000,
                strand,
                is_protein_coding,
            })
            .unwrap();
        let other_gene = annotation
            .add_gene(Gene {
                id: "ENSG2".to_string(),
                name: "GENE2".to_string(),
                contig: CONTIG,
                start: 1000,
                end: 5000,
                strand,
                is_protein_coding,
            })
            .unwrap();
        Fixture {
            annotation,
            gene,
            other_gene,
        }
    }

    fn domain(start: Position, end: Position, name: &str, gene: GeneId) -> ProteinDomain {
        ProteinDomain {
            contig: CONTIG,
            start,
            end,
            strand: Strand::Forward,
            name: name.to_string(),
            gene,
        }
    }

    fn annotate(
        f: &Fixture,
        domains: &ProteinDomains,
        breakpoint: Position,
        direction: Direction,
    ) -> String {
        annotate_retained_protein_domains(
            CONTIG,
            breakpoint,
            Strand::Forward,
            false,
            f.gene,
            &f.annotation,
            direction,
            domains,
        )
    }

    #[test]
    fn fully_retained_domain() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);
        assert_eq!(annotate(&f, &domains, 1500, Direction::Upstream), "Kinase(100%)");
        assert_eq!(annotate(&f, &domains, 3000, Direction::Downstream), "Kinase(100%)");
    }

    #[test]
    fn half_retained_domain() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);
        // bases 2000..=2049 kept out of 100
        assert_eq!(annotate(&f, &domains, 2049, Direction::Downstream), "Kinase(50%)");
    }

    #[test]
    fn percentage_is_truncated() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2002, "Tiny", f.gene)]);
        // 2 of 3 bases = 66.67%
        assert_eq!(annotate(&f, &domains, 2001, Direction::Downstream), "Tiny(66%)");
    }

    #[test]
    fn domains_not_starting_in_retained_part_are_ignored() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);
        // domain straddles the breakpoint but starts before the retained part
        assert_eq!(annotate(&f, &domains, 2050, Direction::Upstream), "");
        assert_eq!(annotate(&f, &domains, 1999, Direction::Downstream), "");
    }

    #[test]
    fn same_name_accumulates_and_output_sorted_by_name() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![
            domain(1100, 1199, "Zinc_finger", f.gene),
            domain(1300, 1399, "Zinc_finger", f.gene),
            domain(1200, 1249, "Ankyrin", f.gene),
            domain(1150, 1160, "Foreign", f.other_gene),
        ]);
        // Zinc_finger: 100 + 50 retained of 200, Ankyrin fully retained
        assert_eq!(
            annotate(&f, &domains, 1349, Direction::Downstream),
            "Ankyrin(100%),Zinc_finger(75%)"
        );
    }

    #[test]
    fn empty_when_strand_or_coding_status_rules_out_annotation() {
        let domains_for = |f: &Fixture| ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);

        let non_coding = fixture(Strand::Forward, false);
        assert_eq!(
            annotate(&non_coding, &domains_for(&non_coding), 1500, Direction::Upstream),
            ""
        );

        let f = fixture(Strand::Forward, true);
        let domains = domains_for(&f);
        for (strand, ambiguous) in [
            (Strand::Forward, true),
            (Strand::Reverse, false),
            (Strand::Reverse, true),
        ] {
            for direction in [Direction::Upstream, Direction::Downstream] {
                let result = annotate_retained_protein_domains(
                    CONTIG,
                    1500,
                    strand,
                    ambiguous,
                    f.gene,
                    &f.annotation,
                    direction,
                    &domains,
                );
                assert_eq!(result, "");
            }
        }
    }

    #[test]
    fn contig_without_domains() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);
        let result = annotate_retained_protein_domains(
            CONTIG + 5,
            1500,
            Strand::Forward,
            false,
            f.gene,
            &f.annotation,
            Direction::Upstream,
            &domains,
        );
        assert_eq!(result, "");
    }

    #[test]
    fn breakpoint_outside_gene_gives_empty_range() {
        let f = fixture(Strand::Forward, true);
        let domains = ProteinDomains::new(vec![domain(2000, 2099, "Kinase", f.gene)]);
        assert_eq!(annotate(&f, &domains, 500, Direction::Downstream), "");
        assert_eq!(annotate(&f, &domains, 6000, Direction::Upstream), "");
    }
}
